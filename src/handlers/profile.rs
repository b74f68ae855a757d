//! Profile and preferences handlers.
//!
//! GET/PUT /api/profile and GET/PUT /api/profile/preferences.

use axum::{Json, extract::State};
use sea_orm::{ActiveModelTrait, Set};
use tracing::info;

use crate::AppState;
use crate::entities::users;
use crate::models::error::ApiError;
use crate::models::user::{Preferences, ProfileResponse, UpdateProfileRequest};
use crate::session::{AuthUser, load_account};

/// The authenticated account's profile
///
/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    actor: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let account = load_account(&state, &actor).await?;
    Ok(Json(ProfileResponse::from(account)))
}

/// Partially update the authenticated account's profile
///
/// PUT /api/profile
///
/// Only supplied fields change. Role is not among them: it is mutable only
/// through the admin endpoints.
pub async fn update_profile(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let account = load_account(&state, &actor).await?;
    let mut active: users::ActiveModel = account.into();

    if let Some(first_name) = payload.first_name {
        active.first_name = Set(Some(first_name));
    }
    if let Some(surname) = payload.surname {
        active.surname = Set(Some(surname));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(company_name) = payload.company_name {
        active.company_name = Set(Some(company_name));
    }
    if let Some(position) = payload.position_in_company {
        active.position_in_company = Set(Some(position));
    }
    if let Some(website) = payload.company_website {
        active.company_website = Set(Some(website));
    }
    if let Some(address) = payload.company_address {
        active.company_address = Set(Some(address));
    }
    if let Some(aum_band) = payload.aum_band {
        active.aum_band = Set(Some(aum_band));
    }

    let updated = active.update(&state.db).await?;
    info!(user_id = updated.id, "profile updated");

    Ok(Json(ProfileResponse::from(updated)))
}

/// The authenticated account's preferences document
///
/// GET /api/profile/preferences
///
/// An account that never saved preferences reads as an empty document.
pub async fn get_preferences(
    State(state): State<AppState>,
    actor: AuthUser,
) -> Result<Json<Preferences>, ApiError> {
    let account = load_account(&state, &actor).await?;
    Ok(Json(Preferences::from_document(&account.preferences)))
}

/// Update the authenticated account's preferences
///
/// PUT /api/profile/preferences
///
/// Read-merge-write: the stored document is read, the supplied fields and
/// extra keys are overlaid, and the merged document is written back as a
/// whole. Keys absent from the payload survive the update.
pub async fn update_preferences(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(incoming): Json<Preferences>,
) -> Result<Json<Preferences>, ApiError> {
    let account = load_account(&state, &actor).await?;

    let mut merged = Preferences::from_document(&account.preferences);
    merged.merge_from(incoming);
    let document = merged.to_document();

    let mut active: users::ActiveModel = account.into();
    active.preferences = Set(document);
    let updated = active.update(&state.db).await?;
    info!(user_id = updated.id, "preferences updated");

    Ok(Json(Preferences::from_document(&updated.preferences)))
}
