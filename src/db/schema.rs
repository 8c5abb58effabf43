//! SQL DDL for initializing the plant-care database.

/// SQLite schema:
/// - `plants` holds the care metadata; `last_watered` defaults to the insert
///   date, stored as an ISO-8601 day
/// - `rooms` is a flat list of named locations
/// - `plants_rooms` links each plant to at most one room
///   (`plant_id` UNIQUE); `room_id` is intentionally non-unique
pub const SQLITE_INIT: &str = r#"
CREATE TABLE plants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    common_name TEXT NOT NULL,
    scientific_name TEXT NOT NULL,
    water_frequency INTEGER NOT NULL,
    last_watered TEXT NOT NULL DEFAULT (date('now')),
    light TEXT NOT NULL
);

CREATE TABLE rooms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    room_name TEXT NOT NULL
);

CREATE TABLE plants_rooms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    plant_id INTEGER UNIQUE REFERENCES plants(id),
    room_id INTEGER REFERENCES rooms(id)
);
"#;

/// Seeded into `rooms` the first time the schema is created.
pub const DEFAULT_ROOM: &str = "Living Room";
