use super::trip::{NewTrip, Trip, TripPatch};
use std::sync::Arc;
use thiserror::Error;

/// Failure surfaced by a trip store.
///
/// `Backend` carries the store client's own message verbatim; callers put it
/// into the response envelope's `error` field unchanged.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The id cannot be a key in this store (e.g. not a valid ObjectId).
    #[error("malformed trip id `{0}`")]
    MalformedId(String),
    /// Connection loss, query failure, serialization trouble.
    #[error("{0}")]
    Backend(String),
}

/// Abstraction for trip persistence.
#[async_trait::async_trait]
pub trait TripRepository: Send + Sync {
    // ---
    /// All trips, newest first (`createdAt` descending).
    async fn list(&self) -> Result<Vec<Trip>, StoreError>;

    /// Look up a single trip. `Ok(None)` when the id has no match.
    async fn find(&self, id: &str) -> Result<Option<Trip>, StoreError>;

    /// Persist a prepared record. The store assigns the id.
    async fn insert(&self, record: NewTrip) -> Result<Trip, StoreError>;

    /// Apply a partial update and return the merged record.
    /// `Ok(None)` when the id has no match.
    async fn update(&self, id: &str, patch: TripPatch) -> Result<Option<Trip>, StoreError>;

    /// Hard-delete. `Ok(false)` when the id has no match.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Type alias for any backend that implements TripRepository.
pub type TripRepositoryPtr = Arc<dyn TripRepository>;
