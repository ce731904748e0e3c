//! Booking repository implementation.
//!
//! Bookings occupy half-open `[check_in, check_out)` date intervals. Two
//! intervals conflict iff `a.check_in < b.check_out AND a.check_out >
//! b.check_in`; back-to-back stays share a boundary date and do not
//! conflict. Cancelled bookings never block a room.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use stayhub_core::error::AppError;
use stayhub_core::result::AppResult;
use stayhub_core::types::pagination::{PageRequest, PageResponse};
use stayhub_entity::booking::model::CreateBooking;
use stayhub_entity::booking::{Booking, BookingStatus, PaymentStatus};

use super::db_err;

/// Name of the storage-level exclusion constraint that rejects overlapping
/// non-cancelled bookings for the same room.
const OVERLAP_CONSTRAINT: &str = "bookings_no_overlap";

/// Repository for booking persistence and conflict queries.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find booking by id"))
    }

    /// Check whether any non-cancelled booking for the room overlaps the
    /// given half-open interval.
    pub async fn has_conflict(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                 SELECT 1 FROM bookings \
                 WHERE room_id = $1 \
                   AND status != 'cancelled' \
                   AND check_in < $3 \
                   AND check_out > $2)",
        )
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("Failed to check booking conflicts"))
    }

    /// Insert a new booking only if the room has no conflicting booking.
    ///
    /// The conflict check and the insert run in one transaction holding a
    /// row lock on the room, so two concurrent overlapping creates cannot
    /// both pass the check. The `bookings_no_overlap` exclusion constraint
    /// backs this up at the storage layer; a violation from either path
    /// surfaces as `Conflict`.
    pub async fn create_if_available(&self, data: &CreateBooking) -> AppResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin booking transaction"))?;

        let room: Option<Uuid> = sqlx::query_scalar("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(data.room_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err("Failed to lock room for booking"))?;

        if room.is_none() {
            return Err(AppError::not_found(format!(
                "Room {} not found",
                data.room_id
            )));
        }

        let conflict: bool = sqlx::query_scalar(
            "SELECT EXISTS( \
                 SELECT 1 FROM bookings \
                 WHERE room_id = $1 \
                   AND status != 'cancelled' \
                   AND check_in < $3 \
                   AND check_out > $2)",
        )
        .bind(data.room_id)
        .bind(data.check_in)
        .bind(data.check_out)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err("Failed to check booking conflicts"))?;

        if conflict {
            return Err(AppError::conflict(
                "Room is already booked for these dates",
            ));
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (room_id, guest_id, check_in, check_out, guests, \
                                   total_price_cents, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(data.room_id)
        .bind(data.guest_id)
        .bind(data.check_in)
        .bind(data.check_out)
        .bind(data.guests)
        .bind(data.total_price_cents)
        .bind(data.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_e) if db_e.constraint() == Some(OVERLAP_CONSTRAINT) => {
                AppError::conflict("Room is already booked for these dates")
            }
            _ => db_err("Failed to create booking")(e),
        })?;

        tx.commit()
            .await
            .map_err(db_err("Failed to commit booking transaction"))?;

        Ok(booking)
    }

    /// List bookings made by the given guest, newest first.
    pub async fn find_by_guest(
        &self,
        guest_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE guest_id = $1")
            .bind(guest_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err("Failed to count bookings by guest"))?;

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE guest_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(guest_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list bookings by guest"))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List bookings against rooms owned by the given user, newest first.
    pub async fn find_by_room_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings b \
             JOIN rooms r ON r.id = b.room_id WHERE r.owner_id = $1",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("Failed to count bookings by room owner"))?;

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b \
             JOIN rooms r ON r.id = b.room_id WHERE r.owner_id = $1 \
             ORDER BY b.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list bookings by room owner"))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Room IDs with at least one non-cancelled booking overlapping the
    /// given interval. Used to exclude booked rooms from date-aware search.
    pub async fn find_booked_room_ids(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT DISTINCT room_id FROM bookings \
             WHERE status != 'cancelled' AND check_in < $2 AND check_out > $1",
        )
        .bind(check_in)
        .bind(check_out)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to find booked rooms"))
    }

    /// Check whether the room has any non-cancelled booking at all.
    pub async fn has_active_for_room(&self, room_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE room_id = $1 AND status != 'cancelled')",
        )
        .bind(room_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("Failed to check active bookings for room"))
    }

    /// Update a booking's status dimensions. `None` fields are unchanged.
    pub async fn update_statuses(
        &self,
        id: Uuid,
        status: Option<BookingStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = COALESCE($2, status), \
                                 payment_status = COALESCE($3, payment_status), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(payment_status)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to update booking status"))?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))
    }
}
