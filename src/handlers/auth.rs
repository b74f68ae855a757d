//! Registration and login handlers.
//!
//! POST /api/auth/register, POST /api/auth/login, GET /api/auth/me.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::AppState;
use crate::entities::{prelude::Users, users};
use crate::models::error::ApiError;
use crate::models::user::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, normalize_email,
};
use crate::services::password;
use crate::session::{AuthUser, create_token, load_account};

/// Rate limit: max login attempts per normalized email per minute
const LOGIN_ATTEMPTS_PER_MINUTE: usize = 10;

/// Per-email login attempt tracking
struct LoginRateLimiter {
    /// Map of normalized email -> recent attempt timestamps
    attempts: HashMap<String, Vec<Instant>>,
}

impl LoginRateLimiter {
    fn new() -> Self {
        Self {
            attempts: HashMap::new(),
        }
    }

    /// Check if an attempt is allowed for the given email and record it if so
    fn check_and_record(&mut self, email: &str) -> bool {
        let now = Instant::now();
        let one_minute_ago = now - std::time::Duration::from_secs(60);

        let timestamps = self.attempts.entry(email.to_string()).or_default();
        timestamps.retain(|t| *t > one_minute_ago);

        if timestamps.len() >= LOGIN_ATTEMPTS_PER_MINUTE {
            return false;
        }

        timestamps.push(now);
        true
    }

    /// Drop stale entries to bound memory growth
    fn cleanup_stale_entries(&mut self) {
        let one_minute_ago = Instant::now() - std::time::Duration::from_secs(60);
        self.attempts.retain(|_, timestamps| {
            timestamps.retain(|t| *t > one_minute_ago);
            !timestamps.is_empty()
        });
    }
}

lazy_static::lazy_static! {
    static ref RATE_LIMITER: Arc<Mutex<LoginRateLimiter>> =
        Arc::new(Mutex::new(LoginRateLimiter::new()));
}

/// Register a new account
///
/// POST /api/auth/register
///
/// Normalizes the email, hashes the password and inserts the account. The
/// case-insensitive uniqueness index decides races: the losing insert maps
/// to a duplicate-email conflict and leaves no partial row.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let email = normalize_email(&payload.email);
    info!(email = %email, role = %payload.role, "registration request received");

    let password_hash =
        password::hash_password(&payload.password).map_err(|_| ApiError::Internal("password hashing failed"))?;

    let account = users::ActiveModel {
        email: Set(email.clone()),
        password_hash: Set(password_hash),
        role: Set(payload.role.to_lowercase()),
        first_name: Set(payload.first_name.clone()),
        surname: Set(payload.surname.clone()),
        phone: Set(payload.phone.clone()),
        company_name: Set(payload.company_name.clone()),
        aum_band: Set(payload.aum_band.clone()),
        is_verified: Set(false),
        preferences: Set(serde_json::json!({})),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let inserted = account.insert(&state.db).await.map_err(|e| {
        if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            warn!(email = %email, "registration rejected: email already registered");
            ApiError::DuplicateEmail
        } else {
            ApiError::Storage(e)
        }
    })?;

    let token = create_token(&state.jwt_secret, inserted.id)
        .map_err(|_| ApiError::Internal("token creation failed"))?;

    info!(user_id = inserted.id, email = %email, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: ProfileResponse::from(inserted),
        }),
    ))
}

/// Authenticate an existing account
///
/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same error; attempts are
/// rate limited per normalized email.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = normalize_email(&payload.email);

    {
        let mut limiter = RATE_LIMITER.lock().await;
        if !limiter.check_and_record(&email) {
            warn!(email = %email, "login rate limit exceeded");
            return Err(ApiError::RateLimited(
                "Too many login attempts. Try again in a minute.",
            ));
        }
        limiter.cleanup_stale_entries();
    }

    let user = Users::find()
        .filter(users::Column::Email.eq(&email))
        .one(&state.db)
        .await?;

    let user = match user {
        Some(user) if password::verify_password(&payload.password, &user.password_hash) => user,
        _ => {
            warn!(email = %email, "login failed");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = create_token(&state.jwt_secret, user.id)
        .map_err(|_| ApiError::Internal("token creation failed"))?;

    info!(user_id = user.id, "login successful");

    Ok(Json(AuthResponse {
        token,
        user: ProfileResponse::from(user),
    }))
}

/// The authenticated account's profile
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    actor: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let account = load_account(&state, &actor).await?;
    Ok(Json(ProfileResponse::from(account)))
}
