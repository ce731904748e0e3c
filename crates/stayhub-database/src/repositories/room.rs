//! Room repository implementation.

use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use stayhub_core::error::AppError;
use stayhub_core::result::AppResult;
use stayhub_core::types::pagination::{PageRequest, PageResponse};
use stayhub_entity::room::model::{CreateRoom, UpdateRoom};
use stayhub_entity::room::{Amenities, Room, RoomType};

use super::db_err;

/// Structured filter for room search.
///
/// Every field is optional; `None` means "do not filter on this". The
/// amenity filter is built from the closed [`Amenities`] flag set, never
/// from caller-supplied keys.
#[derive(Debug, Clone, Default)]
pub struct RoomSearchFilter {
    /// Match any of these exact city names (fuzzy-matcher output).
    pub cities: Option<Vec<String>>,
    /// Case-insensitive substring fallback when no city matched.
    pub city_pattern: Option<String>,
    /// Exact room type.
    pub room_type: Option<RoomType>,
    /// Minimum nightly price in cents.
    pub min_price_cents: Option<i64>,
    /// Maximum nightly price in cents.
    pub max_price_cents: Option<i64>,
    /// Minimum guest capacity.
    pub min_guests: Option<i32>,
    /// Amenity flags that must all be present.
    pub amenities: Option<Amenities>,
}

impl RoomSearchFilter {
    /// Build the JSONB containment document for the amenity filter,
    /// containing only the flags that are required.
    fn amenities_doc(&self) -> Option<serde_json::Value> {
        let wanted = self.amenities?;
        let mut doc = serde_json::Map::new();
        for (key, set) in [
            ("free_wifi", wanted.free_wifi),
            ("free_breakfast", wanted.free_breakfast),
            ("room_service", wanted.room_service),
            ("mountain_view", wanted.mountain_view),
            ("pool_access", wanted.pool_access),
        ] {
            if set {
                doc.insert(key.to_string(), json!(true));
            }
        }
        if doc.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(doc))
        }
    }
}

/// Repository for room CRUD and search operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find room by id"))
    }

    /// List all rooms currently open for booking, newest first.
    pub async fn find_available(&self, page: &PageRequest) -> AppResult<PageResponse<Room>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE is_available")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err("Failed to count available rooms"))?;

        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE is_available ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list available rooms"))?;

        Ok(PageResponse::new(
            rooms,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List rooms owned by the given user, newest first.
    pub async fn find_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Room>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err("Failed to count rooms by owner"))?;

        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE owner_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list rooms by owner"))?;

        Ok(PageResponse::new(
            rooms,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Return the distinct set of cities that have at least one room.
    pub async fn distinct_cities(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT city FROM rooms")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to list distinct cities"))
    }

    /// Search bookable rooms with structured filters, cheapest first.
    pub async fn search(&self, filter: &RoomSearchFilter) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE is_available \
               AND ($1::text[] IS NULL OR city = ANY($1)) \
               AND ($2::text IS NULL OR city ILIKE $2) \
               AND ($3::room_type IS NULL OR room_type = $3) \
               AND ($4::bigint IS NULL OR price_per_night_cents >= $4) \
               AND ($5::bigint IS NULL OR price_per_night_cents <= $5) \
               AND ($6::int IS NULL OR max_guests >= $6) \
               AND ($7::jsonb IS NULL OR amenities @> $7) \
             ORDER BY price_per_night_cents ASC",
        )
        .bind(&filter.cities)
        .bind(filter.city_pattern.as_ref().map(|p| format!("%{p}%")))
        .bind(filter.room_type)
        .bind(filter.min_price_cents)
        .bind(filter.max_price_cents)
        .bind(filter.min_guests)
        .bind(filter.amenities_doc())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to search rooms"))
    }

    /// Create a new room listing.
    pub async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (owner_id, hotel_name, description, city, room_type, \
                                price_per_night_cents, max_guests, amenities, images) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.hotel_name)
        .bind(&data.description)
        .bind(&data.city)
        .bind(data.room_type)
        .bind(data.price_per_night_cents)
        .bind(data.max_guests)
        .bind(Json(data.amenities))
        .bind(&data.images)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("Failed to create room"))
    }

    /// Update a room's mutable fields.
    pub async fn update(&self, room_id: Uuid, data: &UpdateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET hotel_name = COALESCE($2, hotel_name), \
                              description = COALESCE($3, description), \
                              city = COALESCE($4, city), \
                              room_type = COALESCE($5, room_type), \
                              price_per_night_cents = COALESCE($6, price_per_night_cents), \
                              max_guests = COALESCE($7, max_guests), \
                              is_available = COALESCE($8, is_available), \
                              amenities = COALESCE($9, amenities), \
                              images = COALESCE($10, images), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(room_id)
        .bind(&data.hotel_name)
        .bind(&data.description)
        .bind(&data.city)
        .bind(data.room_type)
        .bind(data.price_per_night_cents)
        .bind(data.max_guests)
        .bind(data.is_available)
        .bind(data.amenities.map(Json))
        .bind(&data.images)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to update room"))?
        .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))
    }

    /// Delete a room by ID.
    pub async fn delete(&self, room_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(room_id)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to delete room"))?;

        Ok(result.rows_affected() > 0)
    }
}
