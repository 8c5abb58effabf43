use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

use crate::db::models::{Plant, PlantInput, Room};
use crate::db::schema::{DEFAULT_ROOM, SQLITE_INIT};
use crate::error::VerdantError;

pub type SqlitePool = Pool<Sqlite>;

/// Open a pool for `database_url` (e.g. `sqlite:verdant.sqlite3`), creating
/// the file if missing. Foreign keys are enforced on every connection so
/// stale ids fail loudly instead of corrupting associations.
pub async fn connect(database_url: &str) -> Result<SqlitePool, VerdantError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(opts).await?;
    Ok(pool)
}

/// Plant rows joined with their room assignment. Left outer joins keep
/// plants that have no association row (room_name comes back NULL).
const SELECT_PLANTS: &str = r#"
SELECT plants.id, plants.common_name, plants.scientific_name,
       plants.water_frequency, plants.last_watered, plants.light,
       rooms.room_name
FROM plants
LEFT OUTER JOIN plants_rooms ON plants.id = plants_rooms.plant_id
LEFT OUTER JOIN rooms ON plants_rooms.room_id = rooms.id
"#;

/// Persistence facade over the plants/rooms/plants_rooms tables.
///
/// Every multi-statement mutation runs in a single transaction, so a
/// mid-sequence failure leaves no partial state.
#[derive(Clone)]
pub struct PlantStorage {
    pool: SqlitePool,
}

impl PlantStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the schema and seed the default room, once.
    ///
    /// Gated on the existence of the `plants` table so a restart neither
    /// recreates tables nor duplicates the seed.
    pub async fn init_schema(&self) -> Result<(), VerdantError> {
        let existing: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'plants'")
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        // sqlx::query takes one statement at a time, so split the DDL.
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut *tx).await?;
        }
        sqlx::query("INSERT INTO rooms (room_name) VALUES (?)")
            .bind(DEFAULT_ROOM)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        info!("database schema created, seeded default room");
        Ok(())
    }

    pub async fn find_all_plants(&self) -> Result<Vec<Plant>, VerdantError> {
        let plants = sqlx::query_as::<_, Plant>(&format!("{SELECT_PLANTS} ORDER BY plants.id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(plants)
    }

    pub async fn find_all_plants_in_room(&self, room_name: &str) -> Result<Vec<Plant>, VerdantError> {
        let plants = sqlx::query_as::<_, Plant>(&format!(
            "{SELECT_PLANTS} WHERE rooms.room_name = ? ORDER BY plants.id"
        ))
        .bind(room_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(plants)
    }

    pub async fn find_one_plant(&self, id: i64) -> Result<Option<Plant>, VerdantError> {
        let plant = sqlx::query_as::<_, Plant>(&format!("{SELECT_PLANTS} WHERE plants.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plant)
    }

    pub async fn find_all_rooms(&self) -> Result<Vec<Room>, VerdantError> {
        let rooms = sqlx::query_as::<_, Room>("SELECT id, room_name FROM rooms ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rooms)
    }

    pub async fn find_one_room(&self, id: i64) -> Result<Option<Room>, VerdantError> {
        let room = sqlx::query_as::<_, Room>("SELECT id, room_name FROM rooms WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    /// Bridge from the name-based UI inputs to id-based mutations. Unknown
    /// names fail explicitly rather than mapping to a sentinel id.
    pub async fn find_room_id(&self, room_name: &str) -> Result<i64, VerdantError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM rooms WHERE room_name = ?")
            .bind(room_name)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(id,)| id)
            .ok_or_else(|| VerdantError::UnknownRoom(room_name.to_string()))
    }

    pub async fn create_room(&self, room_name: &str) -> Result<i64, VerdantError> {
        let done = sqlx::query("INSERT INTO rooms (room_name) VALUES (?)")
            .bind(room_name)
            .execute(&self.pool)
            .await?;
        debug!(room_name, "created room");
        Ok(done.last_insert_rowid())
    }

    /// Insert a plant and its room association in one transaction. The room
    /// is resolved by name up front, so an unknown room fails before any
    /// write. Returns the new plant id.
    pub async fn new_plant(&self, input: &PlantInput) -> Result<i64, VerdantError> {
        let mut tx = self.pool.begin().await?;

        let room: Option<(i64,)> = sqlx::query_as("SELECT id FROM rooms WHERE room_name = ?")
            .bind(&input.room_name)
            .fetch_optional(&mut *tx)
            .await?;
        let (room_id,) = room.ok_or_else(|| VerdantError::UnknownRoom(input.room_name.clone()))?;

        let done = sqlx::query(
            "INSERT INTO plants (common_name, scientific_name, water_frequency, light)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&input.common_name)
        .bind(&input.scientific_name)
        .bind(input.water_frequency)
        .bind(&input.light)
        .execute(&mut *tx)
        .await?;
        let plant_id = done.last_insert_rowid();

        sqlx::query("INSERT INTO plants_rooms (plant_id, room_id) VALUES (?, ?)")
            .bind(plant_id)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(plant_id, room_id, "created plant");
        Ok(plant_id)
    }

    /// Rewrite the four scalar columns, then reassign the room by name, all
    /// in one transaction.
    pub async fn update_plant(&self, id: i64, input: &PlantInput) -> Result<(), VerdantError> {
        let mut tx = self.pool.begin().await?;

        let done = sqlx::query("UPDATE plants SET common_name = ? WHERE id = ?")
            .bind(&input.common_name)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if done.rows_affected() == 0 {
            return Err(VerdantError::PlantNotFound(id));
        }
        sqlx::query("UPDATE plants SET scientific_name = ? WHERE id = ?")
            .bind(&input.scientific_name)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE plants SET water_frequency = ? WHERE id = ?")
            .bind(input.water_frequency)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE plants SET light = ? WHERE id = ?")
            .bind(&input.light)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let room: Option<(i64,)> = sqlx::query_as("SELECT id FROM rooms WHERE room_name = ?")
            .bind(&input.room_name)
            .fetch_optional(&mut *tx)
            .await?;
        let (room_id,) = room.ok_or_else(|| VerdantError::UnknownRoom(input.room_name.clone()))?;

        // Reassignment is delete-then-insert, so a plant that somehow lost
        // its association gets one back instead of a no-op update.
        sqlx::query("DELETE FROM plants_rooms WHERE plant_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO plants_rooms (plant_id, room_id) VALUES (?, ?)")
            .bind(id)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(plant_id = id, room_id, "updated plant");
        Ok(())
    }

    pub async fn update_room(&self, room_name: &str, id: i64) -> Result<(), VerdantError> {
        let done = sqlx::query("UPDATE rooms SET room_name = ? WHERE id = ?")
            .bind(room_name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(VerdantError::RoomNotFound(id));
        }
        debug!(room_id = id, room_name, "renamed room");
        Ok(())
    }

    /// Idempotent reassignment: drop whatever association the plant has,
    /// then insert the new one. Calling this twice with the same arguments
    /// leaves exactly one association row.
    pub async fn add_plant_to_room(&self, plant_id: i64, room_id: i64) -> Result<(), VerdantError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM plants_rooms WHERE plant_id = ?")
            .bind(plant_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO plants_rooms (plant_id, room_id) VALUES (?, ?)")
            .bind(plant_id)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        debug!(plant_id, room_id, "reassigned plant");
        Ok(())
    }

    pub async fn water_plant(&self, id: i64) -> Result<(), VerdantError> {
        let done = sqlx::query("UPDATE plants SET last_watered = date('now') WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(VerdantError::PlantNotFound(id));
        }
        debug!(plant_id = id, "watered plant");
        Ok(())
    }

    /// Delete the association row first, then the plant row.
    pub async fn delete_plant(&self, id: i64) -> Result<(), VerdantError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM plants_rooms WHERE plant_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let done = sqlx::query("DELETE FROM plants WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if done.rows_affected() == 0 {
            return Err(VerdantError::PlantNotFound(id));
        }
        tx.commit().await?;
        debug!(plant_id = id, "deleted plant");
        Ok(())
    }

    /// Move any plants in the room to the lowest-id remaining room, then
    /// delete the room. Deleting the only room fails with `LastRoom` before
    /// any row is touched.
    pub async fn delete_room(&self, id: i64) -> Result<(), VerdantError> {
        let mut tx = self.pool.begin().await?;

        let fallback: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM rooms WHERE id != ? ORDER BY id LIMIT 1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((fallback_id,)) = fallback else {
            return Err(VerdantError::LastRoom);
        };

        sqlx::query("UPDATE plants_rooms SET room_id = ? WHERE room_id = ?")
            .bind(fallback_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let done = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if done.rows_affected() == 0 {
            return Err(VerdantError::RoomNotFound(id));
        }

        tx.commit().await?;
        debug!(room_id = id, fallback_id, "deleted room");
        Ok(())
    }
}
