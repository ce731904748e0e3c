//! Room listing management and search.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use stayhub_core::error::AppError;
use stayhub_core::result::AppResult;
use stayhub_core::types::pagination::{PageRequest, PageResponse};
use stayhub_database::repositories::booking::BookingRepository;
use stayhub_database::repositories::room::{RoomRepository, RoomSearchFilter};
use stayhub_entity::room::model::{CreateRoom, UpdateRoom};
use stayhub_entity::room::{Amenities, Room, RoomType};

use crate::booking::availability::DateRange;
use crate::context::RequestContext;

use super::search::match_cities;

/// Search parameters for room discovery.
///
/// Every field is optional. The city is matched fuzzily; supplying both
/// dates filters out rooms with a conflicting booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRoomsRequest {
    /// Free-text city query.
    pub city: Option<String>,
    /// Exact room category.
    pub room_type: Option<RoomType>,
    /// Minimum nightly price in cents.
    pub min_price_cents: Option<i64>,
    /// Maximum nightly price in cents.
    pub max_price_cents: Option<i64>,
    /// Minimum guest capacity.
    pub guests: Option<i32>,
    /// Required amenity flags.
    pub amenities: Option<Amenities>,
    /// Desired check-in date.
    pub check_in: Option<NaiveDate>,
    /// Desired check-out date.
    pub check_out: Option<NaiveDate>,
}

/// Handles room CRUD and search.
#[derive(Debug, Clone)]
pub struct RoomService {
    /// Room repository.
    room_repo: Arc<RoomRepository>,
    /// Booking repository, for date filtering and deletion guards.
    booking_repo: Arc<BookingRepository>,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(room_repo: Arc<RoomRepository>, booking_repo: Arc<BookingRepository>) -> Self {
        Self {
            room_repo,
            booking_repo,
        }
    }

    /// Lists all bookable rooms, newest first.
    pub async fn list_available(&self, page: &PageRequest) -> AppResult<PageResponse<Room>> {
        self.room_repo.find_available(page).await
    }

    /// Fetches a single room.
    pub async fn get(&self, room_id: Uuid) -> AppResult<Room> {
        self.room_repo
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))
    }

    /// Lists the authenticated owner's rooms.
    pub async fn my_rooms(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Room>> {
        if !ctx.is_owner() {
            return Err(AppError::forbidden("Only hotel owners have room listings"));
        }
        self.room_repo.find_by_owner(ctx.user_id, page).await
    }

    /// Lists a new room for the authenticated owner.
    pub async fn create(&self, ctx: &RequestContext, mut data: CreateRoom) -> AppResult<Room> {
        if !ctx.is_owner() {
            return Err(AppError::forbidden("Only hotel owners may list rooms"));
        }
        data.owner_id = ctx.user_id;

        if data.hotel_name.trim().is_empty() {
            return Err(AppError::validation("Hotel name is required"));
        }
        if data.city.trim().is_empty() {
            return Err(AppError::validation("City is required"));
        }
        Self::validate_price(data.price_per_night_cents)?;
        Self::validate_capacity(data.max_guests)?;

        let room = self.room_repo.create(&data).await?;

        info!(room_id = %room.id, owner_id = %ctx.user_id, city = %room.city, "Room listed");
        Ok(room)
    }

    /// Updates a room owned by the authenticated owner.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        room_id: Uuid,
        data: UpdateRoom,
    ) -> AppResult<Room> {
        let room = self.get(room_id).await?;
        if room.owner_id != ctx.user_id {
            return Err(AppError::forbidden("Not authorized to update this room"));
        }

        if let Some(price) = data.price_per_night_cents {
            Self::validate_price(price)?;
        }
        if let Some(guests) = data.max_guests {
            Self::validate_capacity(guests)?;
        }

        self.room_repo.update(room_id, &data).await
    }

    /// Deletes a room owned by the authenticated owner.
    ///
    /// A room with any non-cancelled booking cannot be deleted.
    pub async fn delete(&self, ctx: &RequestContext, room_id: Uuid) -> AppResult<()> {
        let room = self.get(room_id).await?;
        if room.owner_id != ctx.user_id {
            return Err(AppError::forbidden("Not authorized to delete this room"));
        }

        if self.booking_repo.has_active_for_room(room_id).await? {
            return Err(AppError::conflict(
                "Room has active bookings and cannot be deleted",
            ));
        }

        self.room_repo.delete(room_id).await?;
        info!(room_id = %room_id, "Room deleted");
        Ok(())
    }

    /// Searches bookable rooms with fuzzy city matching, structured
    /// filters, and optional date-range exclusion.
    pub async fn search(&self, req: &SearchRoomsRequest) -> AppResult<Vec<Room>> {
        let mut filter = RoomSearchFilter {
            room_type: req.room_type,
            min_price_cents: req.min_price_cents,
            max_price_cents: req.max_price_cents,
            min_guests: req.guests,
            amenities: req.amenities,
            ..Default::default()
        };

        if let Some(city) = req.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            let known = self.room_repo.distinct_cities().await?;
            let matched = match_cities(city, &known);
            if matched.is_empty() {
                // No close match; fall back to a plain substring filter so
                // the search degrades rather than widening.
                filter.city_pattern = Some(city.to_string());
            } else {
                filter.cities = Some(matched);
            }
        }

        let mut rooms = self.room_repo.search(&filter).await?;

        if let (Some(check_in), Some(check_out)) = (req.check_in, req.check_out) {
            let range = DateRange::new(check_in, check_out)?;
            let booked: HashSet<Uuid> = self
                .booking_repo
                .find_booked_room_ids(range.check_in, range.check_out)
                .await?
                .into_iter()
                .collect();
            rooms.retain(|room| !booked.contains(&room.id));
        }

        Ok(rooms)
    }

    fn validate_price(price_per_night_cents: i64) -> AppResult<()> {
        if price_per_night_cents < 0 {
            return Err(AppError::validation("Price cannot be negative"));
        }
        Ok(())
    }

    fn validate_capacity(max_guests: i32) -> AppResult<()> {
        if max_guests < 1 {
            return Err(AppError::validation("Max guests must be at least 1"));
        }
        Ok(())
    }
}
