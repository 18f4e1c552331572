mod metrics;
mod repository;
mod trip;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose persistence abstractions
pub use repository::{StoreError, TripRepository, TripRepositoryPtr};

// Publicly expose the trip model and its write preparation
pub use trip::{DateInput, NewTrip, Trip, TripDraft, TripPatch, TripStatus, ValidationError};
