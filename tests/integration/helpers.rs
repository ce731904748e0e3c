//! Shared test helpers for integration tests.

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use chrono::{Duration, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower::ServiceExt;
use uuid::Uuid;

use stayhub_core::config::AppConfig;

/// Tests share one database, so they run one at a time.
static DB_LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Held for the lifetime of the test to serialize database access
    _guard: OwnedMutexGuard<()>,
}

impl TestApp {
    /// Create a new test application against a clean database
    pub async fn new() -> Self {
        let guard = DB_LOCK
            .get_or_init(|| Arc::new(Mutex::new(())))
            .clone()
            .lock_owned()
            .await;

        let config = AppConfig::load_from("tests/fixtures/test_config")
            .expect("Failed to load test config");

        let db = stayhub_database::connection::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = db.into_pool();

        stayhub_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let user_repo = Arc::new(stayhub_database::repositories::user::UserRepository::new(
            db_pool.clone(),
        ));
        let room_repo = Arc::new(stayhub_database::repositories::room::RoomRepository::new(
            db_pool.clone(),
        ));
        let booking_repo = Arc::new(
            stayhub_database::repositories::booking::BookingRepository::new(db_pool.clone()),
        );

        let password_hasher = Arc::new(stayhub_auth::password::hasher::PasswordHasher::new());
        let jwt_encoder = Arc::new(stayhub_auth::jwt::encoder::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(stayhub_auth::jwt::decoder::JwtDecoder::new(&config.auth));

        let user_service = Arc::new(stayhub_service::user::service::UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&jwt_encoder),
            config.auth.clone(),
        ));
        let room_service = Arc::new(stayhub_service::room::service::RoomService::new(
            Arc::clone(&room_repo),
            Arc::clone(&booking_repo),
        ));
        let booking_service = Arc::new(stayhub_service::booking::service::BookingService::new(
            Arc::clone(&booking_repo),
            Arc::clone(&room_repo),
        ));

        let app_state = stayhub_api::state::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
            jwt_encoder,
            jwt_decoder,
            password_hasher,
            user_repo,
            room_repo,
            booking_repo,
            user_service,
            room_service,
            booking_service,
        };

        let router = stayhub_api::router::build_router(app_state);

        Self {
            router,
            db_pool,
            _guard: guard,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        for table in ["bookings", "rooms", "users"] {
            let query = format!("DELETE FROM {}", table);
            sqlx::query(&query)
                .execute(pool)
                .await
                .expect("Failed to clean table");
        }
    }

    /// Create a test user directly in the database and return their ID
    pub async fn create_test_user(&self, email: &str, password: &str, role: &str) -> Uuid {
        let hasher = stayhub_auth::password::hasher::PasswordHasher::new();
        let hash = hasher.hash_password(password).expect("Failed to hash password");

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4::user_role) RETURNING id",
        )
        .bind(email.split('@').next().unwrap_or("user"))
        .bind(email)
        .bind(&hash)
        .bind(role)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test user")
    }

    /// Create a test room directly in the database and return its ID
    pub async fn create_test_room(
        &self,
        owner_id: Uuid,
        city: &str,
        price_per_night_cents: i64,
        max_guests: i32,
    ) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO rooms (owner_id, hotel_name, description, city, room_type, \
                                price_per_night_cents, max_guests, amenities) \
             VALUES ($1, $2, 'A room for testing', $3, 'double_bed', $4, $5, \
                     '{\"free_wifi\": true}'::jsonb) \
             RETURNING id",
        )
        .bind(owner_id)
        .bind(format!("Test Hotel {city}"))
        .bind(city)
        .bind(price_per_night_cents)
        .bind(max_guests)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test room")
    }

    /// Force a booking into the given status, bypassing the API.
    pub async fn set_booking_status(&self, booking_id: Uuid, status: &str) {
        sqlx::query("UPDATE bookings SET status = $2::booking_status WHERE id = $1")
            .bind(booking_id)
            .bind(status)
            .execute(&self.db_pool)
            .await
            .expect("Failed to set booking status");
    }

    /// Fetch a booking's (status, payment_status) pair directly.
    pub async fn booking_state(&self, booking_id: Uuid) -> (String, String) {
        sqlx::query_as::<_, (String, String)>(
            "SELECT status::text, payment_status::text FROM bookings WHERE id = $1",
        )
        .bind(booking_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to fetch booking state")
    }

    /// Count bookings for a room.
    pub async fn booking_count(&self, room_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count bookings")
    }

    /// Login and return a bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The machine-readable error code, if any.
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error").and_then(|v| v.as_str())
    }
}

/// A date `days` from today, as an ISO string for request bodies.
pub fn future_date(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days)).to_string()
}
