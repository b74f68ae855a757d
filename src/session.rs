//! Bearer-token session layer.
//!
//! Login and registration mint a signed JWT carrying the account id. The
//! extractors below turn an incoming request into an authenticated actor:
//! the token only proves identity — the role is re-read from the store on
//! every request, so an admin changing an account's role takes effect on
//! that account's next request without re-authentication.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::entities::{prelude::Users, users};
use crate::models::error::ApiError;
use crate::models::user::Role;

const TOKEN_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: i32,
    /// Expiry, unix seconds
    pub exp: usize,
}

/// Mint a bearer token for an account.
pub fn create_token(secret: &str, user_id: i32) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        exp: (chrono::Utc::now() + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp()
            as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode a bearer token into its claims.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// The authenticated actor: id plus the role currently on record.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i32,
    pub role: Role,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

async fn resolve_actor(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let claims =
        decode_token(&state.jwt_secret, token).map_err(|_| ApiError::InvalidCredentials)?;

    let user = Users::find_by_id(claims.sub)
        .one(&state.db)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let role: Role = user
        .role
        .parse()
        .map_err(|_| ApiError::Internal("account carries an unknown role"))?;

    Ok(AuthUser { id: user.id, role })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::InvalidCredentials)?;
        resolve_actor(state, token).await
    }
}

/// Anonymous-or-authenticated actor for endpoints that are public but vary
/// their response by caller (e.g. the can_edit flag on a listing detail).
/// A missing header is anonymous; a present but invalid token is rejected.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts) {
            None => Ok(OptionalAuthUser(None)),
            Some(token) => resolve_actor(state, token).await.map(|u| OptionalAuthUser(Some(u))),
        }
    }
}

/// Fetch the full account row behind an actor.
pub async fn load_account(state: &AppState, actor: &AuthUser) -> Result<users::Model, ApiError> {
    Users::find_by_id(actor.id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Account"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = create_token("test-secret", 42).unwrap();
        let claims = decode_token("test-secret", &token).unwrap();
        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("test-secret", 42).unwrap();
        assert!(decode_token("other-secret", &token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(decode_token("test-secret", "not.a.token").is_err());
    }
}
