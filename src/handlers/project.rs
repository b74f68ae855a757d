//! Project listing CRUD handlers.
//!
//! POST /api/projects, GET /api/projects/{id}, PUT /api/projects/{id},
//! GET /api/projects/mine, POST /api/projects/{id}/attachment.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{info, warn};

use crate::AppState;
use crate::entities::{prelude::Projects, projects};
use crate::models::error::ApiError;
use crate::models::project::{
    CreateProjectRequest, ProjectDetailResponse, ProjectResponse, UpdateProjectRequest,
};
use crate::services::access::{can_create_project, can_edit_project};
use crate::services::attachment::{allowed_file, store_attachment};
use crate::session::{AuthUser, OptionalAuthUser};

/// Create a new project listing
///
/// POST /api/projects
///
/// Developers and admins only.
pub async fn create_project(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    if !can_create_project(&actor) {
        warn!(user_id = actor.id, "project creation denied");
        return Err(ApiError::PermissionDenied(
            "Only developers can upload projects",
        ));
    }

    payload.validate().map_err(ApiError::Validation)?;

    let correlation_id = uuid::Uuid::new_v4().to_string();
    info!(
        correlation_id = %correlation_id,
        user_id = actor.id,
        title = %payload.title,
        "project creation request received"
    );

    let project = projects::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description.trim().to_string()),
        project_type: Set(payload.project_type.to_lowercase()),
        budget: Set(payload.budget),
        funding: Set(payload.funding),
        duration: Set(payload.duration),
        irr: Set(payload.irr),
        location: Set(payload.location.trim().to_string()),
        location_type: Set(payload.location_type.clone()),
        risk_level: Set(payload.risk_level),
        secured: Set(payload.secured.to_lowercase()),
        sponsor_equity: Set(payload.sponsor_equity),
        moic_em: Set(payload.moic_em),
        timeline: Set(payload.timeline.clone()),
        exit_strategy: Set(payload.exit_strategy.clone()),
        developer_track_record: Set(payload.developer_track_record.clone()),
        website: Set(payload.website.clone()),
        preapproved_facility: Set(payload.preapproved_facility.clone()),
        brand_partnership: Set(payload.brand_partnership.clone()),
        attachment_path: Set(None),
        user_id: Set(actor.id),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let inserted = project.insert(&state.db).await?;
    info!(
        correlation_id = %correlation_id,
        project_id = inserted.id,
        "project created"
    );

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(inserted))))
}

/// Fetch a single listing plus whether the caller may edit it
///
/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    actor: OptionalAuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ProjectDetailResponse>, ApiError> {
    let project = Projects::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Project"))?;

    let can_edit = can_edit_project(actor.0.as_ref(), &project);

    Ok(Json(ProjectDetailResponse {
        project: ProjectResponse::from(project),
        can_edit,
    }))
}

/// Partially update a listing
///
/// PUT /api/projects/{id}
///
/// Only the owner (developer) or an admin may mutate; the policy is
/// re-evaluated against the store on every call.
pub async fn update_project(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = Projects::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Project"))?;

    if !can_edit_project(Some(&actor), &project) {
        warn!(user_id = actor.id, project_id = id, "project edit denied");
        return Err(ApiError::PermissionDenied(
            "You do not have permission to edit this project",
        ));
    }

    payload.validate().map_err(ApiError::Validation)?;

    let mut active: projects::ActiveModel = project.into();
    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description.trim().to_string());
    }
    if let Some(project_type) = payload.project_type {
        active.project_type = Set(project_type.to_lowercase());
    }
    if let Some(budget) = payload.budget {
        active.budget = Set(budget);
    }
    if let Some(funding) = payload.funding {
        active.funding = Set(funding);
    }
    if let Some(duration) = payload.duration {
        active.duration = Set(Some(duration));
    }
    if let Some(irr) = payload.irr {
        active.irr = Set(irr);
    }
    if let Some(location) = payload.location {
        active.location = Set(location.trim().to_string());
    }
    if let Some(location_type) = payload.location_type {
        active.location_type = Set(Some(location_type));
    }
    if let Some(risk_level) = payload.risk_level {
        active.risk_level = Set(risk_level);
    }
    if let Some(secured) = payload.secured {
        active.secured = Set(secured.to_lowercase());
    }
    if let Some(sponsor_equity) = payload.sponsor_equity {
        active.sponsor_equity = Set(sponsor_equity);
    }
    if let Some(moic_em) = payload.moic_em {
        active.moic_em = Set(Some(moic_em));
    }
    if let Some(timeline) = payload.timeline {
        active.timeline = Set(Some(timeline));
    }
    if let Some(exit_strategy) = payload.exit_strategy {
        active.exit_strategy = Set(Some(exit_strategy));
    }
    if let Some(track_record) = payload.developer_track_record {
        active.developer_track_record = Set(Some(track_record));
    }
    if let Some(website) = payload.website {
        active.website = Set(Some(website));
    }
    if let Some(facility) = payload.preapproved_facility {
        active.preapproved_facility = Set(Some(facility));
    }
    if let Some(brand) = payload.brand_partnership {
        active.brand_partnership = Set(Some(brand));
    }

    let updated = active.update(&state.db).await?;
    info!(project_id = updated.id, user_id = actor.id, "project updated");

    Ok(Json(ProjectResponse::from(updated)))
}

/// The authenticated account's own listings, newest first
///
/// GET /api/projects/mine
pub async fn my_projects(
    State(state): State<AppState>,
    actor: AuthUser,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let rows = Projects::find()
        .filter(projects::Column::UserId.eq(actor.id))
        .order_by_desc(projects::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(ProjectResponse::from).collect()))
}

/// Attach a document to a listing
///
/// POST /api/projects/{id}/attachment
///
/// Multipart upload; the first file field is taken. The extension must be
/// in the allow-list; the stored filename is recorded on the listing.
pub async fn upload_attachment(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = Projects::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Project"))?;

    if !can_edit_project(Some(&actor), &project) {
        warn!(user_id = actor.id, project_id = id, "attachment upload denied");
        return Err(ApiError::PermissionDenied(
            "You do not have permission to edit this project",
        ));
    }

    let mut stored: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("Invalid multipart payload".to_string()))?
    {
        let Some(filename) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        if !allowed_file(&filename) {
            return Err(ApiError::Validation("Invalid file type!".to_string()));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|_| ApiError::Validation("Invalid multipart payload".to_string()))?;

        let stored_name = store_attachment(&state.upload_dir, &filename, &bytes)
            .await
            .map_err(|_| ApiError::Internal("attachment write failed"))?;

        info!(
            project_id = id,
            filename = %stored_name,
            size = bytes.len(),
            "attachment stored"
        );
        stored = Some(stored_name);
        break;
    }

    let stored = stored.ok_or_else(|| ApiError::Validation("No file supplied".to_string()))?;

    let mut active: projects::ActiveModel = project.into();
    active.attachment_path = Set(Some(stored));
    let updated = active.update(&state.db).await?;

    Ok(Json(ProjectResponse::from(updated)))
}
