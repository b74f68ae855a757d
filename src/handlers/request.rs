//! Request-ledger handlers: NDA and callback submissions.
//!
//! POST /api/requests/nda, POST /api/requests/callback. Pure append; the
//! ledger has no update or delete.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use tracing::info;

use crate::AppState;
use crate::entities::{callback_requests, nda_requests};
use crate::models::error::ApiError;
use crate::models::request::{
    CallbackRequestPayload, CallbackRequestResponse, NdaRequestPayload, NdaRequestResponse,
};
use crate::session::AuthUser;

/// File an NDA request
///
/// POST /api/requests/nda
///
/// Authenticated. The project reference is stored as a plain id and not
/// validated against the projects table; a dangling reference is fine.
pub async fn create_nda_request(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<NdaRequestPayload>,
) -> Result<(StatusCode, Json<NdaRequestResponse>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let request = nda_requests::ActiveModel {
        user_id: Set(actor.id),
        project_id: Set(payload.project_id),
        company: Set(payload.company.trim().to_string()),
        contact_name: Set(payload.contact_name.trim().to_string()),
        contact_email: Set(payload.contact_email.trim().to_string()),
        message: Set(payload.message.clone()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let inserted = request.insert(&state.db).await?;
    info!(
        request_id = inserted.id,
        user_id = actor.id,
        project_id = inserted.project_id,
        "NDA request filed"
    );

    Ok((StatusCode::CREATED, Json(NdaRequestResponse::from(inserted))))
}

/// File a callback request
///
/// POST /api/requests/callback
///
/// Public; not tied to an account.
pub async fn create_callback_request(
    State(state): State<AppState>,
    Json(payload): Json<CallbackRequestPayload>,
) -> Result<(StatusCode, Json<CallbackRequestResponse>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let request = callback_requests::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        company: Set(payload.company.trim().to_string()),
        phone: Set(payload.phone.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        message: Set(payload.message.clone()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let inserted = request.insert(&state.db).await?;
    info!(request_id = inserted.id, "callback request filed");

    Ok((
        StatusCode::CREATED,
        Json(CallbackRequestResponse::from(inserted)),
    ))
}
