//! Integration tests for the booking flow: availability, creation,
//! conflicts, and lifecycle transitions.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, future_date};

fn stay(room_id: uuid::Uuid, check_in_days: i64, check_out_days: i64, guests: i32) -> serde_json::Value {
    json!({
        "room_id": room_id,
        "check_in": future_date(check_in_days),
        "check_out": future_date(check_out_days),
        "guests": guests,
    })
}

#[tokio::test]
async fn test_check_availability_quotes_price() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@quotes.test", "password123", "hotel_owner").await;
    // $100.00 per night
    let room = app.create_test_room(owner, "Lisbon", 10_000, 4).await;

    let response = app
        .request(
            "POST",
            "/api/bookings/check-availability",
            Some(stay(room, 10, 13, 2)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["available"], json!(true));
    assert_eq!(data["nights"], json!(3));
    assert_eq!(data["price_per_night_cents"], json!(10_000));
    assert_eq!(data["total_price_cents"], json!(30_000));
}

#[tokio::test]
async fn test_check_availability_unknown_room_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/bookings/check-availability",
            Some(stay(uuid::Uuid::new_v4(), 10, 12, 1)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_overlapping_booking_conflicts_and_adjacent_succeeds() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@overlap.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@overlap.test", "password123", "guest").await;
    app.create_test_user("other@overlap.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Porto", 8_000, 4).await;

    let guest_token = app.login("guest@overlap.test", "password123").await;
    let other_token = app.login("other@overlap.test", "password123").await;

    // Guest books [day+10, day+15)
    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&guest_token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    // Overlapping request [day+12, day+18) must conflict
    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 12, 18, 2)), Some(&other_token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("CONFLICT"));

    // Back-to-back request [day+15, day+20) shares a boundary and succeeds
    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 15, 20, 2)), Some(&other_token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
}

#[tokio::test]
async fn test_pending_booking_blocks_the_slot() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@pending.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@pending.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Turin", 8_000, 4).await;
    let token = app.login("guest@pending.test", "password123").await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let booking_id: uuid::Uuid = response.body["data"]["id"].as_str().unwrap().parse().unwrap();

    // Even while merely pending, the booking occupies the room.
    app.set_booking_status(booking_id, "pending").await;

    let response = app
        .request(
            "POST",
            "/api/bookings/check-availability",
            Some(stay(room, 12, 14, 2)),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_slot() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@freed.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@freed.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Ghent", 8_000, 4).await;
    let token = app.login("guest@freed.test", "password123").await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let booking_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/cancel"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // The identical range can now be booked again.
    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
}

#[tokio::test]
async fn test_guest_count_above_capacity_creates_nothing() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@capacity.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@capacity.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Nice", 8_000, 4).await;
    let token = app.login("guest@capacity.test", "password123").await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 5)), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("GUESTS_EXCEED_CAPACITY"));
    assert_eq!(app.booking_count(room).await, 0);
}

#[tokio::test]
async fn test_inverted_date_range_is_rejected() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@dates.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@dates.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Split", 8_000, 4).await;
    let token = app.login("guest@dates.test", "password123").await;

    // check_out before check_in
    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 15, 10, 2)), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_DATE_RANGE"));

    // zero-night stay
    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 10, 2)), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_DATE_RANGE"));
}

#[tokio::test]
async fn test_past_check_in_is_rejected_on_both_paths() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@past.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@past.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Leeds", 8_000, 4).await;
    let token = app.login("guest@past.test", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/bookings/check-availability",
            Some(stay(room, -3, 2, 2)),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_DATE_RANGE"));

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, -3, 2, 2)), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_DATE_RANGE"));
}

#[tokio::test]
async fn test_unavailable_room_cannot_be_booked() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@offline.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@offline.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Graz", 8_000, 4).await;
    let token = app.login("guest@offline.test", "password123").await;

    sqlx::query("UPDATE rooms SET is_available = FALSE WHERE id = $1")
        .bind(room)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 12, 2)), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("ROOM_UNAVAILABLE"));
}

#[tokio::test]
async fn test_concurrent_overlapping_creates_one_winner() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@race.test", "password123", "hotel_owner").await;
    app.create_test_user("alice@race.test", "password123", "guest").await;
    app.create_test_user("bob@race.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Basel", 8_000, 4).await;

    let alice = app.login("alice@race.test", "password123").await;
    let bob = app.login("bob@race.test", "password123").await;

    let body = stay(room, 10, 15, 2);
    let (first, second) = tokio::join!(
        app.request("POST", "/api/bookings", Some(body.clone()), Some(&alice)),
        app.request("POST", "/api/bookings", Some(body.clone()), Some(&bob)),
    );

    let statuses = [first.status, second.status];
    assert!(
        statuses.contains(&StatusCode::CREATED),
        "neither request succeeded: {:?} / {:?}",
        first.body,
        second.body
    );
    assert!(
        statuses.contains(&StatusCode::CONFLICT),
        "both requests succeeded"
    );
    assert_eq!(app.booking_count(room).await, 1);
}

#[tokio::test]
async fn test_cancel_by_stranger_is_forbidden_and_changes_nothing() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@stranger.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@stranger.test", "password123", "guest").await;
    app.create_test_user("stranger@stranger.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Pula", 8_000, 4).await;

    let guest_token = app.login("guest@stranger.test", "password123").await;
    let stranger_token = app.login("stranger@stranger.test", "password123").await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&guest_token))
        .await;
    let booking_id: uuid::Uuid = response.body["data"]["id"].as_str().unwrap().parse().unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/cancel"),
            None,
            Some(&stranger_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("FORBIDDEN"));

    let (status, _) = app.booking_state(booking_id).await;
    assert_eq!(status, "confirmed");
}

#[tokio::test]
async fn test_owner_confirms_pending_booking() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@confirm.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@confirm.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Gdansk", 8_000, 4).await;

    let guest_token = app.login("guest@confirm.test", "password123").await;
    let owner_token = app.login("owner@confirm.test", "password123").await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&guest_token))
        .await;
    let booking_id: uuid::Uuid = response.body["data"]["id"].as_str().unwrap().parse().unwrap();
    app.set_booking_status(booking_id, "pending").await;

    // The guest may not confirm their own booking.
    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/confirm"),
            None,
            Some(&guest_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/confirm"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "confirmed");
}

#[tokio::test]
async fn test_completing_a_pending_booking_is_rejected() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@complete.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@complete.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Bruges", 8_000, 4).await;

    let guest_token = app.login("guest@complete.test", "password123").await;
    let owner_token = app.login("owner@complete.test", "password123").await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&guest_token))
        .await;
    let booking_id: uuid::Uuid = response.body["data"]["id"].as_str().unwrap().parse().unwrap();
    app.set_booking_status(booking_id, "pending").await;

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/complete"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("INVALID_TRANSITION"));

    // From confirmed it works.
    app.set_booking_status(booking_id, "confirmed").await;
    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/complete"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "completed");
}

#[tokio::test]
async fn test_payment_flow_and_double_payment() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@pay.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@pay.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Malmo", 8_000, 4).await;
    let token = app.login("guest@pay.test", "password123").await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&token))
        .await;
    let booking_id: uuid::Uuid = response.body["data"]["id"].as_str().unwrap().parse().unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/pay"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["payment_status"], "paid");

    // Paying again hits the terminal payment state.
    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/pay"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("ALREADY_IN_TERMINAL_STATE"));
}

#[tokio::test]
async fn test_cancelling_a_paid_booking_refunds_it() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@refund.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@refund.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Oslo", 8_000, 4).await;
    let token = app.login("guest@refund.test", "password123").await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&token))
        .await;
    let booking_id: uuid::Uuid = response.body["data"]["id"].as_str().unwrap().parse().unwrap();

    app.request(
        "POST",
        &format!("/api/bookings/{booking_id}/pay"),
        None,
        Some(&token),
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/cancel"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "cancelled");
    assert_eq!(response.body["data"]["payment_status"], "refunded");
}

#[tokio::test]
async fn test_paying_a_cancelled_booking_is_rejected() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@deadpay.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@deadpay.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Turku", 8_000, 4).await;
    let token = app.login("guest@deadpay.test", "password123").await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&token))
        .await;
    let booking_id: uuid::Uuid = response.body["data"]["id"].as_str().unwrap().parse().unwrap();

    app.request(
        "POST",
        &format!("/api/bookings/{booking_id}/cancel"),
        None,
        Some(&token),
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/pay"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("INVALID_TRANSITION"));

    // Re-cancelling a cancelled booking is also rejected.
    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/cancel"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("ALREADY_IN_TERMINAL_STATE"));
}

#[tokio::test]
async fn test_owner_sees_bookings_for_their_rooms() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@lists.test", "password123", "hotel_owner").await;
    app.create_test_user("guest@lists.test", "password123", "guest").await;
    let room = app.create_test_room(owner, "Brno", 8_000, 4).await;

    let guest_token = app.login("guest@lists.test", "password123").await;
    let owner_token = app.login("owner@lists.test", "password123").await;

    app.request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), Some(&guest_token))
        .await;

    let response = app
        .request("GET", "/api/bookings/me", None, Some(&guest_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 1);

    let response = app
        .request("GET", "/api/bookings/owner", None, Some(&owner_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 1);

    // A plain guest has no owner dashboard.
    let response = app
        .request("GET", "/api/bookings/owner", None, Some(&guest_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_booking_requires_authentication() {
    let app = TestApp::new().await;
    let owner = app.create_test_user("owner@anon.test", "password123", "hotel_owner").await;
    let room = app.create_test_room(owner, "Riga", 8_000, 4).await;

    let response = app
        .request("POST", "/api/bookings", Some(stay(room, 10, 15, 2)), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
