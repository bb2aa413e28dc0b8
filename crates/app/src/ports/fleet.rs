//! Fleet port — fleet records and everything scoped to a fleet.

use std::future::Future;

use iotfleet_domain::board::Board;
use iotfleet_domain::error::IotFleetError;
use iotfleet_domain::fleet::Fleet;
use iotfleet_domain::id::FleetId;
use iotfleet_domain::injection::Injection;

/// Remote access to fleets, their boards and fleet-level injections.
pub trait FleetGateway {
    /// List every fleet visible to the caller.
    fn list_fleets(&self) -> impl Future<Output = Result<Vec<Fleet>, IotFleetError>> + Send;

    /// Get a fleet by id, `None` when it does not exist.
    fn get_fleet(
        &self,
        id: &FleetId,
    ) -> impl Future<Output = Result<Option<Fleet>, IotFleetError>> + Send;

    /// Create a fleet. The returned record carries the id assigned remotely.
    fn create_fleet(
        &self,
        fleet: Fleet,
    ) -> impl Future<Output = Result<Fleet, IotFleetError>> + Send;

    /// Replace the name and description of an existing fleet.
    fn update_fleet(
        &self,
        fleet: Fleet,
    ) -> impl Future<Output = Result<Fleet, IotFleetError>> + Send;

    /// Delete a fleet by id.
    fn delete_fleet(&self, id: &FleetId)
    -> impl Future<Output = Result<(), IotFleetError>> + Send;

    /// List the boards belonging to a fleet.
    fn list_boards(
        &self,
        fleet: &FleetId,
    ) -> impl Future<Output = Result<Vec<Board>, IotFleetError>> + Send;

    /// List the plugins injected at fleet scope.
    fn list_fleet_injections(
        &self,
        fleet: &FleetId,
    ) -> impl Future<Output = Result<Vec<Injection>, IotFleetError>> + Send;
}

macro_rules! forward_fleet_gateway {
    ($($ty:ty),+) => {$(
        impl<T: FleetGateway + Send + Sync + ?Sized> FleetGateway for $ty {
            fn list_fleets(&self) -> impl Future<Output = Result<Vec<Fleet>, IotFleetError>> + Send {
                (**self).list_fleets()
            }

            fn get_fleet(
                &self,
                id: &FleetId,
            ) -> impl Future<Output = Result<Option<Fleet>, IotFleetError>> + Send {
                (**self).get_fleet(id)
            }

            fn create_fleet(
                &self,
                fleet: Fleet,
            ) -> impl Future<Output = Result<Fleet, IotFleetError>> + Send {
                (**self).create_fleet(fleet)
            }

            fn update_fleet(
                &self,
                fleet: Fleet,
            ) -> impl Future<Output = Result<Fleet, IotFleetError>> + Send {
                (**self).update_fleet(fleet)
            }

            fn delete_fleet(
                &self,
                id: &FleetId,
            ) -> impl Future<Output = Result<(), IotFleetError>> + Send {
                (**self).delete_fleet(id)
            }

            fn list_boards(
                &self,
                fleet: &FleetId,
            ) -> impl Future<Output = Result<Vec<Board>, IotFleetError>> + Send {
                (**self).list_boards(fleet)
            }

            fn list_fleet_injections(
                &self,
                fleet: &FleetId,
            ) -> impl Future<Output = Result<Vec<Injection>, IotFleetError>> + Send {
                (**self).list_fleet_injections(fleet)
            }
        }
    )+};
}

forward_fleet_gateway!(&T, std::sync::Arc<T>);
