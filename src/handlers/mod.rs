// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod health;
mod metrics;
mod root;
mod shared_types;
mod trips;

// Core handlers
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use root::{hello_handler, root_handler};

// Trip CRUD handlers
pub use trips::{create_trip, delete_trip, get_trip, list_trips, update_trip};

// Response envelopes shared by the trip handlers
pub use shared_types::{ApiResponse, ListResponse, MessageResponse};
