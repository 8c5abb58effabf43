//! Database module: models, schema, and the storage facade.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, plus the watering-due rule
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `PlantStorage`, the persistence facade used by handlers

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Plant, PlantInput, Room};
pub use schema::{DEFAULT_ROOM, SQLITE_INIT};
pub use sqlite::{PlantStorage, SqlitePool, connect};
