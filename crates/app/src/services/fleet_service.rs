//! Fleet service — use-cases for listing and managing fleets.

use iotfleet_domain::error::{IotFleetError, NotFoundError};
use iotfleet_domain::fleet::{Fleet, FleetDetail};
use iotfleet_domain::id::FleetId;

use crate::ports::FleetGateway;
use crate::request_cache::RequestCache;

/// Application service for fleet CRUD operations and the overview page.
pub struct FleetService<G> {
    gateway: G,
}

impl<G: FleetGateway> FleetService<G> {
    /// Create a new service backed by the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// List fleets sorted by name, keeping only those whose name contains
    /// `filter` (case-insensitive) when one is given.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the remote API.
    #[tracing::instrument(skip(self))]
    pub async fn list_fleets(&self, filter: Option<&str>) -> Result<Vec<Fleet>, IotFleetError> {
        let mut fleets = self.gateway.list_fleets().await?;
        if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
            fleets.retain(|fleet| fleet.matches_filter(filter));
        }
        fleets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(fleets)
    }

    /// Look up a fleet by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`IotFleetError::NotFound`] when no fleet with `id` exists,
    /// or the error reported by the remote API.
    #[tracing::instrument(skip(self, cache))]
    pub async fn get_fleet(
        &self,
        cache: &mut RequestCache,
        id: &FleetId,
    ) -> Result<Fleet, IotFleetError> {
        cache
            .fleets
            .get_or_try_fetch(id, || self.gateway.get_fleet(id))
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Fleet",
                    id: id.to_string(),
                }
                .into()
            })
    }

    /// Create a new fleet after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`IotFleetError::Validation`] if the name is blank (no remote
    /// call is made), or the error reported by the remote API.
    #[tracing::instrument(skip(self))]
    pub async fn create_fleet(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Fleet, IotFleetError> {
        let fleet = Fleet::builder()
            .name(name)
            .description(description)
            .build()?;
        let created = self.gateway.create_fleet(fleet).await?;
        tracing::info!(fleet = %created.id, name = %created.name, "fleet created");
        Ok(created)
    }

    /// Rename or re-describe an existing fleet.
    ///
    /// # Errors
    ///
    /// Returns [`IotFleetError::Validation`] if the name is blank, or the
    /// error reported by the remote API.
    #[tracing::instrument(skip(self))]
    pub async fn update_fleet(
        &self,
        id: FleetId,
        name: &str,
        description: &str,
    ) -> Result<Fleet, IotFleetError> {
        let fleet = Fleet::builder()
            .id(id)
            .name(name)
            .description(description)
            .build()?;
        self.gateway.update_fleet(fleet).await
    }

    /// Delete a fleet by id.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the remote API.
    #[tracing::instrument(skip(self))]
    pub async fn delete_fleet(&self, id: &FleetId) -> Result<(), IotFleetError> {
        self.gateway.delete_fleet(id).await?;
        tracing::info!(fleet = %id, "fleet deleted");
        Ok(())
    }

    /// The fleet with its boards and fleet-level plugins.
    ///
    /// Boards and plugins are best-effort: a failed lookup is logged and
    /// rendered as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`IotFleetError::NotFound`] or the remote error when the
    /// fleet itself cannot be loaded.
    #[tracing::instrument(skip(self, cache))]
    pub async fn fleet_detail(
        &self,
        cache: &mut RequestCache,
        id: &FleetId,
    ) -> Result<FleetDetail, IotFleetError> {
        let fleet = self.get_fleet(cache, id).await?;

        let boards = cache
            .fleet_boards
            .get_or_try_fetch(id, || self.gateway.list_boards(id))
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(fleet = %id, error = %err.describe(), "unable to load boards for fleet");
                Vec::new()
            });

        let plugins = cache
            .fleet_injections
            .get_or_try_fetch(id, || self.gateway.list_fleet_injections(id))
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(fleet = %id, error = %err.describe(), "unable to load plugins for fleet");
                Vec::new()
            });

        Ok(FleetDetail {
            fleet,
            boards,
            plugins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iotfleet_domain::board::Board;
    use iotfleet_domain::error::ValidationError;
    use iotfleet_domain::injection::Injection;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct InMemoryFleets {
        store: Mutex<BTreeMap<FleetId, Fleet>>,
        boards_fail: bool,
        remote_calls: AtomicUsize,
    }

    impl FleetGateway for InMemoryFleets {
        fn list_fleets(&self) -> impl Future<Output = Result<Vec<Fleet>, IotFleetError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Fleet> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn get_fleet(
            &self,
            id: &FleetId,
        ) -> impl Future<Output = Result<Option<Fleet>, IotFleetError>> + Send {
            self.remote_calls.fetch_add(1, Ordering::SeqCst);
            let store = self.store.lock().unwrap();
            let result = store.get(id).cloned();
            async { Ok(result) }
        }

        fn create_fleet(
            &self,
            fleet: Fleet,
        ) -> impl Future<Output = Result<Fleet, IotFleetError>> + Send {
            self.remote_calls.fetch_add(1, Ordering::SeqCst);
            let mut store = self.store.lock().unwrap();
            store.insert(fleet.id.clone(), fleet.clone());
            async { Ok(fleet) }
        }

        fn update_fleet(
            &self,
            fleet: Fleet,
        ) -> impl Future<Output = Result<Fleet, IotFleetError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = match store.get_mut(&fleet.id) {
                Some(existing) => {
                    existing.name.clone_from(&fleet.name);
                    existing.description.clone_from(&fleet.description);
                    Ok(existing.clone())
                }
                None => Err(NotFoundError {
                    entity: "Fleet",
                    id: fleet.id.to_string(),
                }
                .into()),
            };
            async { result }
        }

        fn delete_fleet(
            &self,
            id: &FleetId,
        ) -> impl Future<Output = Result<(), IotFleetError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.remove(id);
            async { Ok(()) }
        }

        fn list_boards(
            &self,
            _fleet: &FleetId,
        ) -> impl Future<Output = Result<Vec<Board>, IotFleetError>> + Send {
            let result = if self.boards_fail {
                Err(IotFleetError::Upstream("boards endpoint down".into()))
            } else {
                Ok(vec![Board::new("b1".parse().unwrap())])
            };
            async { result }
        }

        fn list_fleet_injections(
            &self,
            _fleet: &FleetId,
        ) -> impl Future<Output = Result<Vec<Injection>, IotFleetError>> + Send {
            async { Ok(vec![Injection::new("p1".parse().unwrap())]) }
        }
    }

    fn make_service() -> FleetService<InMemoryFleets> {
        FleetService::new(InMemoryFleets::default())
    }

    #[tokio::test]
    async fn should_create_fleet_when_valid() {
        let svc = make_service();
        let created = svc.create_fleet("Greenhouse", "north wing").await.unwrap();

        let mut cache = RequestCache::new();
        let fetched = svc.get_fleet(&mut cache, &created.id).await.unwrap();
        assert_eq!(fetched.name, "Greenhouse");
        assert_eq!(fetched.description.as_deref(), Some("north wing"));
    }

    #[tokio::test]
    async fn should_reject_blank_name_without_remote_call() {
        let svc = make_service();

        let result = svc.create_fleet("  ", "").await;

        assert!(matches!(
            result,
            Err(IotFleetError::Validation(ValidationError::EmptyName))
        ));
        assert_eq!(svc.gateway.remote_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_return_not_found_when_fleet_missing() {
        let svc = make_service();
        let mut cache = RequestCache::new();
        let result = svc.get_fleet(&mut cache, &FleetId::generate()).await;
        assert!(matches!(result, Err(IotFleetError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_filter_and_sort_by_name() {
        let svc = make_service();
        svc.create_fleet("south field", "").await.unwrap();
        svc.create_fleet("North Greenhouse", "").await.unwrap();
        svc.create_fleet("greenhouse annex", "").await.unwrap();

        let all = svc.list_fleets(None).await.unwrap();
        let names: Vec<&str> = all.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["greenhouse annex", "North Greenhouse", "south field"]);

        let filtered = svc.list_fleets(Some("GREEN")).await.unwrap();
        assert_eq!(filtered.len(), 2);

        let blank = svc.list_fleets(Some("  ")).await.unwrap();
        assert_eq!(blank.len(), 3);
    }

    #[tokio::test]
    async fn should_update_fleet() {
        let svc = make_service();
        let created = svc.create_fleet("lab", "").await.unwrap();

        let updated = svc
            .update_fleet(created.id.clone(), "bench", "soldering station")
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "bench");
        assert_eq!(updated.description.as_deref(), Some("soldering station"));
    }

    #[tokio::test]
    async fn should_delete_fleet() {
        let svc = make_service();
        let created = svc.create_fleet("lab", "").await.unwrap();

        svc.delete_fleet(&created.id).await.unwrap();

        let mut cache = RequestCache::new();
        let result = svc.get_fleet(&mut cache, &created.id).await;
        assert!(matches!(result, Err(IotFleetError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_load_detail_with_boards_and_plugins() {
        let svc = make_service();
        let created = svc.create_fleet("lab", "").await.unwrap();
        let mut cache = RequestCache::new();

        let detail = svc.fleet_detail(&mut cache, &created.id).await.unwrap();

        assert_eq!(detail.fleet.id, created.id);
        assert_eq!(detail.boards.len(), 1);
        assert_eq!(detail.plugins.len(), 1);
    }

    #[tokio::test]
    async fn should_render_detail_with_empty_boards_when_board_lookup_fails() {
        let svc = FleetService::new(InMemoryFleets {
            boards_fail: true,
            ..InMemoryFleets::default()
        });
        let created = svc.create_fleet("lab", "").await.unwrap();
        let mut cache = RequestCache::new();

        let detail = svc.fleet_detail(&mut cache, &created.id).await.unwrap();

        assert!(detail.boards.is_empty());
        assert_eq!(detail.plugins.len(), 1);
    }

    #[tokio::test]
    async fn should_fetch_fleet_once_per_request() {
        let svc = make_service();
        let created = svc.create_fleet("lab", "").await.unwrap();
        let before = svc.gateway.remote_calls.load(Ordering::SeqCst);
        let mut cache = RequestCache::new();

        svc.get_fleet(&mut cache, &created.id).await.unwrap();
        svc.fleet_detail(&mut cache, &created.id).await.unwrap();

        assert_eq!(svc.gateway.remote_calls.load(Ordering::SeqCst) - before, 1);
    }
}
