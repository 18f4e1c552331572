use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::domain::{NewTrip, Trip, TripDraft, TripPatch};
use crate::error::ApiError;
use crate::handlers::shared_types::{ApiResponse, ListResponse, MessageResponse};
use crate::AppState;

/// Handler for listing all trips (GET /trip).
///
/// Responds with `200 OK` and a `{success, count, data}` envelope containing
/// every trip, newest first (`createdAt` descending).
///
/// Store failures map to `500 Internal Server Error` with the store's own
/// message in the envelope's `error` field.
#[tracing::instrument(skip(state))]
pub async fn list_trips(
    State(state): State<AppState>,
) -> Result<(StatusCode, ListResponse<Trip>), ApiError> {
    // ---
    let trips = state
        .repository()
        .list()
        .await
        .map_err(|err| ApiError::internal("Error fetching trips", err))?;

    Ok((StatusCode::OK, ListResponse::new(trips)))
}

/// Handler for fetching a single trip by id (GET /trip/{id}).
///
/// - If the trip exists, responds with `200 OK` and the full record.
/// - If the id has no match, responds with `404 Not Found`.
/// - A store failure (a malformed id included) is `500`, matching the
///   service this replaces, which surfaced id cast errors that way.
#[tracing::instrument(skip(state))]
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, ApiResponse<Trip>), ApiError> {
    // ---
    let trip = state
        .repository()
        .find(&id)
        .await
        .map_err(|err| ApiError::internal("Error fetching trip", err))?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::OK, ApiResponse::new(trip)))
}

/// Handler for creating a trip (POST /trip).
///
/// The body must carry `title`, `description`, `destination`, `startDate`,
/// `endDate` and `budget`; `status` is optional and defaults to `planned`.
/// Validation and timestamp assignment happen before the store is called;
/// the store assigns the id.
///
/// - On success, responds with `201 Created` and the persisted record.
/// - Any failure, missing fields or a rejected write alike, is `400` with
///   the validation detail in the envelope.
#[tracing::instrument(skip(state, draft))]
pub async fn create_trip(
    State(state): State<AppState>,
    Json(draft): Json<TripDraft>,
) -> Result<(StatusCode, ApiResponse<Trip>), ApiError> {
    // ---
    let record = NewTrip::from_draft(draft)
        .map_err(|err| ApiError::bad_request("Error creating trip", err))?;

    let trip = state
        .repository()
        .insert(record)
        .await
        .map_err(|err| ApiError::bad_request("Error creating trip", err))?;

    tracing::info!(id = %trip.id, "trip created");
    Ok((StatusCode::CREATED, ApiResponse::new(trip)))
}

/// Handler for updating a trip (PUT /trip/{id}).
///
/// Accepts a partial or full body; only supplied fields are written and
/// `updatedAt` is refreshed on every successful call, even when nothing else
/// changed.
///
/// - On success, responds with `200 OK` and the merged record.
/// - If the id has no match, responds with `404 Not Found`.
/// - Validation and store failures both map to `400`, the way the update
///   route's catch-all did in the service this replaces.
#[tracing::instrument(skip(state, draft))]
pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<TripDraft>,
) -> Result<(StatusCode, ApiResponse<Trip>), ApiError> {
    // ---
    let patch = TripPatch::from_draft(draft)
        .map_err(|err| ApiError::bad_request("Error updating trip", err))?;

    let trip = state
        .repository()
        .update(&id, patch)
        .await
        .map_err(|err| ApiError::bad_request("Error updating trip", err))?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::OK, ApiResponse::new(trip)))
}

/// Handler for deleting a trip (DELETE /trip/{id}).
///
/// - On success, responds with `200 OK` and a confirmation message; this is
///   a hard delete with no tombstone.
/// - If the id has no match, responds with `404 Not Found`.
/// - Store failures map to `500`.
#[tracing::instrument(skip(state))]
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, MessageResponse), ApiError> {
    // ---
    let deleted = state
        .repository()
        .delete(&id)
        .await
        .map_err(|err| ApiError::internal("Error deleting trip", err))?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    tracing::info!(%id, "trip deleted");
    Ok((StatusCode::OK, MessageResponse::new("Trip deleted successfully")))
}
