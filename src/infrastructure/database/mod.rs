// src/infrastructure/database/mod.rs
mod mongo_repository;

pub use mongo_repository::create_mongo_repository;
