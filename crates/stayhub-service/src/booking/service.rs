//! Booking lifecycle service — availability checks, atomic creation, and
//! status transitions.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use stayhub_core::error::AppError;
use stayhub_core::result::AppResult;
use stayhub_core::types::pagination::{PageRequest, PageResponse};
use stayhub_database::repositories::booking::BookingRepository;
use stayhub_database::repositories::room::RoomRepository;
use stayhub_entity::booking::model::CreateBooking;
use stayhub_entity::booking::{Booking, BookingStatus, PaymentStatus};
use stayhub_entity::room::{Room, RoomType};

use crate::context::RequestContext;

use super::availability::DateRange;
use super::pricing::{StayQuote, compute_stay};

/// A stay request to check or book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayRequest {
    /// The room to stay in.
    pub room_id: Uuid,
    /// First night of the stay.
    pub check_in: chrono::NaiveDate,
    /// Departure date.
    pub check_out: chrono::NaiveDate,
    /// Number of guests.
    pub guests: i32,
}

/// The answer to an availability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuote {
    /// Whether the room is free for the requested dates.
    pub available: bool,
    /// Number of nights.
    pub nights: i64,
    /// The room's nightly price in cents.
    pub price_per_night_cents: i64,
    /// Total price for the stay in cents.
    pub total_price_cents: i64,
    /// Hotel name, for display.
    pub hotel_name: String,
    /// Room category, for display.
    pub room_type: RoomType,
}

/// Handles booking creation and lifecycle transitions.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Room repository.
    room_repo: Arc<RoomRepository>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(booking_repo: Arc<BookingRepository>, room_repo: Arc<RoomRepository>) -> Self {
        Self {
            booking_repo,
            room_repo,
        }
    }

    /// Checks whether a room is free for the requested stay and quotes it.
    ///
    /// A conflicting booking is reported as a `Conflict` error, distinct
    /// from `NotFound` for an unknown room.
    pub async fn check_availability(&self, req: &StayRequest) -> AppResult<AvailabilityQuote> {
        let (room, range, quote) = self.validate_stay(req).await?;

        if self
            .booking_repo
            .has_conflict(room.id, range.check_in, range.check_out)
            .await?
        {
            return Err(AppError::conflict(
                "Room is already booked for these dates",
            ));
        }

        Ok(AvailabilityQuote {
            available: true,
            nights: quote.nights,
            price_per_night_cents: room.price_per_night_cents,
            total_price_cents: quote.total_price_cents,
            hotel_name: room.hotel_name,
            room_type: room.room_type,
        })
    }

    /// Books a room for the authenticated guest.
    ///
    /// The conflict check and insert happen atomically in the repository,
    /// so two concurrent overlapping requests cannot both succeed; the
    /// loser receives `Conflict`.
    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        req: &StayRequest,
    ) -> AppResult<Booking> {
        let (room, range, quote) = self.validate_stay(req).await?;

        let booking = self
            .booking_repo
            .create_if_available(&CreateBooking {
                room_id: room.id,
                guest_id: ctx.user_id,
                check_in: range.check_in,
                check_out: range.check_out,
                guests: req.guests,
                total_price_cents: quote.total_price_cents,
                // Bookings are confirmed on creation; owners only step in
                // to cancel or to complete the stay.
                status: BookingStatus::Confirmed,
            })
            .await?;

        info!(
            booking_id = %booking.id,
            room_id = %room.id,
            guest_id = %ctx.user_id,
            nights = quote.nights,
            "Booking created"
        );

        Ok(booking)
    }

    /// Shared validation for the check and create paths: the room must
    /// exist and be bookable, the dates must form a valid future range,
    /// and the party must fit.
    async fn validate_stay(&self, req: &StayRequest) -> AppResult<(Room, DateRange, StayQuote)> {
        let range = DateRange::new(req.check_in, req.check_out)?;
        range.validate_not_past(Utc::now().date_naive())?;

        let room = self
            .room_repo
            .find_by_id(req.room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {} not found", req.room_id)))?;

        if !room.is_available {
            return Err(AppError::room_unavailable(
                "This room is currently unavailable",
            ));
        }

        if req.guests < 1 {
            return Err(AppError::validation("At least one guest is required"));
        }
        if req.guests > room.max_guests {
            return Err(AppError::guests_exceed_capacity(format!(
                "Max guests allowed is {}",
                room.max_guests
            )));
        }

        let quote = compute_stay(&range, room.price_per_night_cents);
        Ok((room, range, quote))
    }

    /// Lists the authenticated guest's own bookings.
    pub async fn my_bookings(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        self.booking_repo.find_by_guest(ctx.user_id, page).await
    }

    /// Lists bookings against rooms owned by the authenticated owner.
    pub async fn owner_bookings(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        if !ctx.is_owner() {
            return Err(AppError::forbidden("Only hotel owners have room bookings"));
        }
        self.booking_repo.find_by_room_owner(ctx.user_id, page).await
    }

    /// Owner confirms a pending booking.
    pub async fn confirm(&self, ctx: &RequestContext, booking_id: Uuid) -> AppResult<Booking> {
        let (booking, room) = self.load_with_room(booking_id).await?;

        if room.owner_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the room's owner may confirm this booking",
            ));
        }
        self.ensure_transition(&booking, BookingStatus::Confirmed)?;

        let updated = self
            .booking_repo
            .update_statuses(booking_id, Some(BookingStatus::Confirmed), None)
            .await?;

        info!(booking_id = %booking_id, "Booking confirmed");
        Ok(updated)
    }

    /// Cancels a booking.
    ///
    /// Permitted to the booking's guest or the room's owner. A paid
    /// booking is refunded as part of cancellation.
    pub async fn cancel(&self, ctx: &RequestContext, booking_id: Uuid) -> AppResult<Booking> {
        let (booking, room) = self.load_with_room(booking_id).await?;

        let is_guest = booking.guest_id == ctx.user_id;
        let is_room_owner = room.owner_id == ctx.user_id;
        if !is_guest && !is_room_owner {
            return Err(AppError::forbidden(
                "Not authorized to cancel this booking",
            ));
        }
        self.ensure_transition(&booking, BookingStatus::Cancelled)?;

        let refund = (booking.payment_status == PaymentStatus::Paid)
            .then_some(PaymentStatus::Refunded);

        let updated = self
            .booking_repo
            .update_statuses(booking_id, Some(BookingStatus::Cancelled), refund)
            .await?;

        info!(
            booking_id = %booking_id,
            by_owner = is_room_owner && !is_guest,
            refunded = refund.is_some(),
            "Booking cancelled"
        );
        Ok(updated)
    }

    /// Owner marks a confirmed stay as completed.
    pub async fn complete(&self, ctx: &RequestContext, booking_id: Uuid) -> AppResult<Booking> {
        let (booking, room) = self.load_with_room(booking_id).await?;

        if room.owner_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the room's owner may complete this booking",
            ));
        }
        self.ensure_transition(&booking, BookingStatus::Completed)?;

        let updated = self
            .booking_repo
            .update_statuses(booking_id, Some(BookingStatus::Completed), None)
            .await?;

        info!(booking_id = %booking_id, "Booking completed");
        Ok(updated)
    }

    /// Guest pays for their booking (mock payment).
    pub async fn pay(&self, ctx: &RequestContext, booking_id: Uuid) -> AppResult<Booking> {
        let (booking, _room) = self.load_with_room(booking_id).await?;

        if booking.guest_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Not authorized to pay for this booking",
            ));
        }

        self.apply_payment(booking).await
    }

    /// Room owner records an out-of-band payment for a booking.
    pub async fn mark_paid(&self, ctx: &RequestContext, booking_id: Uuid) -> AppResult<Booking> {
        let (booking, room) = self.load_with_room(booking_id).await?;

        if room.owner_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the room's owner may mark this booking paid",
            ));
        }

        self.apply_payment(booking).await
    }

    /// Move the payment dimension to `Paid`, guarding both dimensions.
    async fn apply_payment(&self, booking: Booking) -> AppResult<Booking> {
        if booking.status.is_terminal() {
            return Err(AppError::invalid_transition(format!(
                "Cannot pay for a {} booking",
                booking.status
            )));
        }
        if booking.payment_status.is_terminal() {
            return Err(AppError::already_terminal(format!(
                "Booking is already {}",
                booking.payment_status
            )));
        }

        let updated = self
            .booking_repo
            .update_statuses(booking.id, None, Some(PaymentStatus::Paid))
            .await?;

        info!(booking_id = %booking.id, "Booking paid");
        Ok(updated)
    }

    /// Guard a lifecycle transition: terminal states first, then the
    /// transition table.
    fn ensure_transition(&self, booking: &Booking, target: BookingStatus) -> AppResult<()> {
        if booking.status.is_terminal() {
            return Err(AppError::already_terminal(format!(
                "Booking is already {}",
                booking.status
            )));
        }
        if !booking.status.can_transition_to(target) {
            return Err(AppError::invalid_transition(format!(
                "Cannot move a {} booking to {target}",
                booking.status
            )));
        }
        Ok(())
    }

    /// Fetch a booking together with its room, or `NotFound`.
    async fn load_with_room(&self, booking_id: Uuid) -> AppResult<(Booking, Room)> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))?;

        let room = self
            .room_repo
            .find_by_id(booking.room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {} not found", booking.room_id)))?;

        Ok((booking, room))
    }
}
