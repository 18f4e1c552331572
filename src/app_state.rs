//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` holds the trip
//! repository and the metrics implementation behind their domain traits.
//!
//! The state is designed to be cheaply cloneable (everything inside is an
//! `Arc`) so it can be handed to each request handler without copying
//! resources.

use crate::domain::{MetricsPtr, TripRepositoryPtr};

/// Shared application state passed to all Axum handlers.
///
/// This struct is the dependency injection container for the application:
/// handlers depend on the `TripRepository` and `Metrics` traits, never on
/// MongoDB or Prometheus directly, and the composition root decides which
/// implementations go in. Built once at startup, attached to the router via
/// `.with_state(..)`, and cloned by Axum per request.
///
/// Tests assemble the same struct from an in-memory repository and a fresh
/// metrics instance, which is what keeps the whole router testable without
/// a running database.
#[derive(Clone)]
pub struct AppState {
    /// Repository abstraction for persistent trip storage.
    repository: TripRepositoryPtr,

    /// Metrics implementation, Prometheus-backed or no-op.
    metrics: MetricsPtr,
}

impl AppState {
    // ---

    pub fn new(repository: TripRepositoryPtr, metrics: MetricsPtr) -> Self {
        // ---
        AppState {
            repository,
            metrics,
        }
    }

    /// Get a reference to the repository implementation.
    pub fn repository(&self) -> &TripRepositoryPtr {
        // ---
        &self.repository
    }

    /// Get a reference to the metrics implementation.
    pub fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    // ---

    use super::*;
    use crate::domain::{NewTrip, StoreError, Trip, TripPatch, TripRepository};
    use crate::infrastructure::create_noop_metrics;
    use std::sync::Arc;

    // Mock repository for unit tests - not used, just satisfies AppState requirements
    struct MockRepository;

    #[async_trait::async_trait]
    impl TripRepository for MockRepository {
        // ---

        async fn list(&self) -> Result<Vec<Trip>, StoreError> {
            unimplemented!("Mock repository - not used in AppState unit tests")
        }
        async fn find(&self, _id: &str) -> Result<Option<Trip>, StoreError> {
            unimplemented!()
        }
        async fn insert(&self, _record: NewTrip) -> Result<Trip, StoreError> {
            unimplemented!()
        }
        async fn update(&self, _id: &str, _patch: TripPatch) -> Result<Option<Trip>, StoreError> {
            unimplemented!()
        }
        async fn delete(&self, _id: &str) -> Result<bool, StoreError> {
            unimplemented!()
        }
    }

    #[test]
    fn test_app_state_creation_and_clone() {
        // ---
        let repository = Arc::new(MockRepository);
        let metrics = create_noop_metrics().unwrap();

        let app_state = AppState::new(repository, metrics);
        let cloned = app_state.clone();

        // Verify accessors work on both the original and the clone
        let _repo_ref = app_state.repository();
        let _metrics_ref = app_state.metrics();
        assert!(cloned.metrics().render().is_empty());
    }
}
