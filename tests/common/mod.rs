// Test helpers are intentionally partially used
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::Client;
use tokio::net::TcpListener;
use tokio::time::sleep;

use trip_journal::domain::{
    NewTrip, StoreError, Trip, TripPatch, TripRepository, TripRepositoryPtr,
};
use trip_journal::{create_prom_metrics, create_router, AppState};

// ============================================================================
// Test Setup
// ============================================================================

pub fn default_origins() -> Vec<String> {
    // ---
    vec![
        "http://localhost:3000".to_owned(),
        "http://localhost:3001".to_owned(),
    ]
}

/// In-memory `TripRepository` backing the router in tests, so the full HTTP
/// surface runs without a MongoDB instance. Matches the store contract the
/// handlers rely on: newest-first listing, `None` for unknown ids, id
/// assignment on insert.
#[derive(Default)]
pub struct InMemoryTripRepository {
    trips: Mutex<Vec<Trip>>,
}

#[async_trait::async_trait]
impl TripRepository for InMemoryTripRepository {
    // ---
    async fn list(&self) -> Result<Vec<Trip>, StoreError> {
        let mut trips = self.trips.lock().unwrap().clone();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    async fn find(&self, id: &str) -> Result<Option<Trip>, StoreError> {
        let trips = self.trips.lock().unwrap();
        Ok(trips.iter().find(|trip| trip.id == id).cloned())
    }

    async fn insert(&self, record: NewTrip) -> Result<Trip, StoreError> {
        let trip = Trip {
            id: uuid::Uuid::new_v4().to_string(),
            title: record.title,
            description: record.description,
            destination: record.destination,
            start_date: record.start_date,
            end_date: record.end_date,
            budget: record.budget,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };
        self.trips.lock().unwrap().push(trip.clone());
        Ok(trip)
    }

    async fn update(&self, id: &str, patch: TripPatch) -> Result<Option<Trip>, StoreError> {
        let mut trips = self.trips.lock().unwrap();
        match trips.iter_mut().find(|trip| trip.id == id) {
            Some(trip) => {
                patch.apply(trip);
                Ok(Some(trip.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut trips = self.trips.lock().unwrap();
        let before = trips.len();
        trips.retain(|trip| trip.id != id);
        Ok(trips.len() < before)
    }
}

/// Repository whose every call fails, for exercising the error envelopes.
pub struct FailingRepository;

impl FailingRepository {
    fn error() -> StoreError {
        // ---
        StoreError::Backend("connection reset by peer".to_owned())
    }
}

#[async_trait::async_trait]
impl TripRepository for FailingRepository {
    // ---
    async fn list(&self) -> Result<Vec<Trip>, StoreError> {
        Err(Self::error())
    }
    async fn find(&self, _id: &str) -> Result<Option<Trip>, StoreError> {
        Err(Self::error())
    }
    async fn insert(&self, _record: NewTrip) -> Result<Trip, StoreError> {
        Err(Self::error())
    }
    async fn update(&self, _id: &str, _patch: TripPatch) -> Result<Option<Trip>, StoreError> {
        Err(Self::error())
    }
    async fn delete(&self, _id: &str) -> Result<bool, StoreError> {
        Err(Self::error())
    }
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---

    /// Server over a fresh in-memory store. Every instance gets its own
    /// metrics registry, so tests run in parallel without sharing samples.
    pub async fn new() -> Self {
        // ---
        Self::with_repository(Arc::new(InMemoryTripRepository::default())).await
    }

    pub async fn with_repository(repository: TripRepositoryPtr) -> Self {
        // ---
        let metrics = create_prom_metrics().expect("metrics setup should succeed");
        let state = AppState::new(repository, metrics);
        let app =
            create_router(state, &default_origins()).expect("Should be able to create router");

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
