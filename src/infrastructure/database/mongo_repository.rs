use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::config::MongoConfig;
use crate::domain::{NewTrip, StoreError, Trip, TripPatch, TripRepository, TripRepositoryPtr};

/// Connects to MongoDB and returns a trip repository bound to the `trips`
/// collection of the configured database.
///
/// The connection is verified with a ping before the repository is handed
/// out; a parsed URI alone does not prove a reachable server, and callers
/// treat a failure here as fatal.
pub async fn create_mongo_repository(config: &MongoConfig) -> Result<TripRepositoryPtr> {
    // ---
    tracing::info!(uri = %config.uri, database = %config.database, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.uri)
        .await
        .context("Failed to parse MongoDB URI")?;
    options.app_name = Some("Trip Journal".to_string());

    let client = Client::with_options(options).context("Failed to create MongoDB client")?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 }, None)
        .await
        .context("Failed to ping MongoDB")?;

    tracing::info!("MongoDB connection established");

    let trips = client
        .database(&config.database)
        .collection::<TripDocument>("trips");

    Ok(Arc::new(MongoTripRepository::new(trips)))
}

/// Document shape for storing trips in MongoDB.
///
/// Field names match the wire format (camelCase) so documents written by
/// earlier deployments of this service read back unchanged. Timestamps are
/// stored as native BSON datetimes, which truncate to millisecond precision
/// on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TripDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    description: String,
    destination: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    start_date: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    end_date: DateTime<Utc>,
    budget: f64,
    status: crate::domain::TripStatus,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

/// A concrete `TripRepository` backed by a MongoDB collection.
pub struct MongoTripRepository {
    trips: Collection<TripDocument>,
}

impl MongoTripRepository {
    fn new(trips: Collection<TripDocument>) -> Self {
        // ---
        Self { trips }
    }

    /// Convert a validated record into a document, minting the object id.
    fn record_to_doc(record: &NewTrip) -> TripDocument {
        // ---
        TripDocument {
            id: ObjectId::new(),
            title: record.title.clone(),
            description: record.description.clone(),
            destination: record.destination.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
            budget: record.budget,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Convert a stored document back into the wire-facing record.
    fn doc_to_trip(doc: TripDocument) -> Trip {
        // ---
        Trip {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            destination: doc.destination,
            start_date: doc.start_date,
            end_date: doc.end_date,
            budget: doc.budget,
            status: doc.status,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }

    /// Build the `$set` document for a patch. Only supplied fields appear;
    /// `updatedAt` is always present, mirroring `TripPatch::apply`.
    fn patch_to_update(patch: &TripPatch) -> Document {
        // ---
        let mut set = Document::new();
        if let Some(title) = &patch.title {
            set.insert("title", title);
        }
        if let Some(description) = &patch.description {
            set.insert("description", description);
        }
        if let Some(destination) = &patch.destination {
            set.insert("destination", destination);
        }
        if let Some(start_date) = patch.start_date {
            set.insert("startDate", mongodb::bson::DateTime::from_chrono(start_date));
        }
        if let Some(end_date) = patch.end_date {
            set.insert("endDate", mongodb::bson::DateTime::from_chrono(end_date));
        }
        if let Some(budget) = patch.budget {
            set.insert("budget", budget);
        }
        if let Some(status) = patch.status {
            set.insert("status", status.as_str());
        }
        set.insert(
            "updatedAt",
            mongodb::bson::DateTime::from_chrono(patch.updated_at),
        );

        doc! { "$set": set }
    }

    fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
        // ---
        ObjectId::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_owned()))
    }
}

fn backend(err: mongodb::error::Error) -> StoreError {
    // ---
    StoreError::Backend(err.to_string())
}

#[async_trait::async_trait]
impl TripRepository for MongoTripRepository {
    // ---
    async fn list(&self) -> Result<Vec<Trip>, StoreError> {
        // ---
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let mut cursor = self.trips.find(doc! {}, options).await.map_err(backend)?;

        let mut trips = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(backend)? {
            trips.push(Self::doc_to_trip(document));
        }

        Ok(trips)
    }

    async fn find(&self, id: &str) -> Result<Option<Trip>, StoreError> {
        // ---
        let object_id = Self::parse_object_id(id)?;

        let found = self
            .trips
            .find_one(doc! { "_id": object_id }, None)
            .await
            .map_err(backend)?;

        Ok(found.map(Self::doc_to_trip))
    }

    async fn insert(&self, record: NewTrip) -> Result<Trip, StoreError> {
        // ---
        let document = Self::record_to_doc(&record);

        self.trips
            .insert_one(&document, None)
            .await
            .map_err(backend)?;

        Ok(Self::doc_to_trip(document))
    }

    async fn update(&self, id: &str, patch: TripPatch) -> Result<Option<Trip>, StoreError> {
        // ---
        let object_id = Self::parse_object_id(id)?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .trips
            .find_one_and_update(
                doc! { "_id": object_id },
                Self::patch_to_update(&patch),
                options,
            )
            .await
            .map_err(backend)?;

        Ok(updated.map(Self::doc_to_trip))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        // ---
        let object_id = Self::parse_object_id(id)?;

        let deleted = self
            .trips
            .find_one_and_delete(doc! { "_id": object_id }, None)
            .await
            .map_err(backend)?;

        Ok(deleted.is_some())
    }
}
