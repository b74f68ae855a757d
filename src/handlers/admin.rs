//! Admin dashboard handlers: counts, recent records, CSV exports and
//! account administration. Every endpoint is gated on the admin role.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tracing::info;

use crate::AppState;
use crate::entities::{prelude::Users, users};
use crate::models::admin::{
    CountsResponse, ExportEntity, RecentQuery, RoleChangeRequest, UserSummary,
    VerifiedChangeRequest,
};
use crate::models::error::ApiError;
use crate::models::user::Role;
use crate::services::access::require_admin;
use crate::services::reporting;
use crate::session::AuthUser;

/// Row totals for the dashboard
///
/// GET /api/admin/counts
pub async fn counts(
    State(state): State<AppState>,
    actor: AuthUser,
) -> Result<Json<CountsResponse>, ApiError> {
    require_admin(&actor)?;
    Ok(Json(reporting::counts(&state.db).await?))
}

/// The newest N records of an entity
///
/// GET /api/admin/recent/{entity}?n=10
pub async fn recent(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(entity): Path<String>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&actor)?;
    query.validate().map_err(ApiError::Validation)?;

    let entity: ExportEntity = entity
        .parse()
        .map_err(|_| ApiError::NotFound("Entity"))?;

    let rows = reporting::recent(&state.db, entity, query.n()).await?;
    Ok(Json(rows))
}

/// Download a CSV snapshot of an entity
///
/// GET /api/admin/export/{entity}
pub async fn export(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(entity): Path<String>,
) -> Result<Response, ApiError> {
    require_admin(&actor)?;

    let entity: ExportEntity = entity
        .parse()
        .map_err(|_| ApiError::NotFound("Entity"))?;

    let body = reporting::export_csv(&state.db, entity).await?;
    info!(entity = %entity, bytes = body.len(), "CSV export generated");

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.csv\"", entity),
        ),
    ];
    Ok((headers, body).into_response())
}

/// Change an account's role
///
/// PUT /api/admin/users/{id}/role
///
/// Roles are immutable to everyone else; the new role takes effect on the
/// target account's next request.
pub async fn change_role(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(user_id): Path<i32>,
    Json(payload): Json<RoleChangeRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    require_admin(&actor)?;

    let role: Role = payload
        .role
        .parse()
        .map_err(|_| ApiError::Validation("Role must be developer, investor or admin".to_string()))?;

    let account = Users::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Account"))?;

    let mut active: users::ActiveModel = account.into();
    active.role = Set(role.to_string());
    let updated = active.update(&state.db).await?;

    info!(
        admin_id = actor.id,
        user_id = updated.id,
        role = %role,
        "account role changed"
    );

    Ok(Json(UserSummary::from(updated)))
}

/// Set an account's verified flag
///
/// PUT /api/admin/users/{id}/verified
pub async fn change_verified(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(user_id): Path<i32>,
    Json(payload): Json<VerifiedChangeRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    require_admin(&actor)?;

    let account = Users::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Account"))?;

    let mut active: users::ActiveModel = account.into();
    active.is_verified = Set(payload.is_verified);
    let updated = active.update(&state.db).await?;

    info!(
        admin_id = actor.id,
        user_id = updated.id,
        is_verified = payload.is_verified,
        "account verification changed"
    );

    Ok(Json(UserSummary::from(updated)))
}
