//! One-shot MongoDB initialization for the trip journal.
//!
//! Creates the application user with readWrite on the configured database
//! and the collections the service expects. Safe to re-run: a user or
//! collection that already exists is reported and skipped.

use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::error::{Error, ErrorKind};
use mongodb::{Client, Database};

use trip_journal::MongoConfig;

// Server error codes seen on re-runs.
const USER_ALREADY_EXISTS: i32 = 51003;
const NAMESPACE_EXISTS: i32 = 48;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = MongoConfig::from_env()?;
    let app_user = std::env::var("APP_DB_USER").unwrap_or_else(|_| "appuser".to_string());
    let app_password =
        std::env::var("APP_DB_PASSWORD").unwrap_or_else(|_| "apppassword".to_string());

    tracing::info!(uri = %config.uri, database = %config.database, "Initializing MongoDB");

    let client = Client::with_uri_str(&config.uri)
        .await
        .context("Failed to connect to MongoDB")?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 }, None)
        .await
        .context("Failed to ping MongoDB")?;

    let database = client.database(&config.database);

    create_app_user(&database, &app_user, &app_password).await?;
    create_collection(&database, "trips").await?;
    // Not read by the API yet, but part of the database shape deployments
    // and dashboards expect.
    create_collection(&database, "users").await?;

    tracing::info!("MongoDB initialization completed");
    Ok(())
}

/// Grants the application user readWrite on the configured database.
async fn create_app_user(database: &Database, user: &str, password: &str) -> Result<()> {
    // ---
    let command = doc! {
        "createUser": user,
        "pwd": password,
        "roles": [{ "role": "readWrite", "db": database.name() }],
    };

    match database.run_command(command, None).await {
        Ok(_) => {
            tracing::info!(%user, "Application user created");
            Ok(())
        }
        Err(err) if command_code(&err) == Some(USER_ALREADY_EXISTS) => {
            tracing::info!(%user, "Application user already exists, skipping");
            Ok(())
        }
        Err(err) => Err(err).context("Failed to create application user"),
    }
}

async fn create_collection(database: &Database, name: &str) -> Result<()> {
    // ---
    match database.create_collection(name, None).await {
        Ok(()) => {
            tracing::info!(collection = name, "Collection created");
            Ok(())
        }
        Err(err) if command_code(&err) == Some(NAMESPACE_EXISTS) => {
            tracing::info!(collection = name, "Collection already exists, skipping");
            Ok(())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to create collection `{name}`")),
    }
}

fn command_code(err: &Error) -> Option<i32> {
    // ---
    match &*err.kind {
        ErrorKind::Command(command_err) => Some(command_err.code),
        _ => None,
    }
}
