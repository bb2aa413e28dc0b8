//! Board port — live board records and board-level injections.

use std::future::Future;

use iotfleet_domain::board::Board;
use iotfleet_domain::error::IotFleetError;
use iotfleet_domain::id::BoardId;
use iotfleet_domain::injection::Injection;

/// Remote access to individual boards.
pub trait BoardGateway {
    /// Fetch the current record of a board, bypassing any listing cache on
    /// the remote side. `None` when the board does not exist.
    fn get_board(
        &self,
        id: &BoardId,
    ) -> impl Future<Output = Result<Option<Board>, IotFleetError>> + Send;

    /// List the plugins injected directly on a board.
    fn list_board_injections(
        &self,
        id: &BoardId,
    ) -> impl Future<Output = Result<Vec<Injection>, IotFleetError>> + Send;
}

macro_rules! forward_board_gateway {
    ($($ty:ty),+) => {$(
        impl<T: BoardGateway + Send + Sync + ?Sized> BoardGateway for $ty {
            fn get_board(
                &self,
                id: &BoardId,
            ) -> impl Future<Output = Result<Option<Board>, IotFleetError>> + Send {
                (**self).get_board(id)
            }

            fn list_board_injections(
                &self,
                id: &BoardId,
            ) -> impl Future<Output = Result<Vec<Injection>, IotFleetError>> + Send {
                (**self).list_board_injections(id)
            }
        }
    )+};
}

forward_board_gateway!(&T, std::sync::Arc<T>);
