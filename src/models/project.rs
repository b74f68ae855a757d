//! Project listing request/response models.

use serde::{Deserialize, Serialize};

use crate::entities::projects;

/// Recognized project types (stored lowercase).
pub const PROJECT_TYPES: [&str; 3] = ["residential", "commercial", "industrial"];

/// Recognized funding-waterfall tranches (stored lowercase).
pub const SECURED_TRANCHES: [&str; 4] = ["equity", "mezz", "senior", "negotiable"];

fn default_project_type() -> String {
    "commercial".to_string()
}

fn default_secured() -> String {
    "mezz".to_string()
}

fn default_risk_level() -> i32 {
    5
}

/// Request body for POST /api/projects
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default = "default_project_type")]
    pub project_type: String,
    /// Total budget, USD millions
    pub budget: f64,
    /// Funding required, USD millions
    pub funding: f64,
    /// Funding duration, months
    pub duration: Option<i32>,
    /// Expected IRR, percent
    pub irr: f64,
    pub location: String,
    pub location_type: Option<String>,
    /// Risk level 1-10
    #[serde(default = "default_risk_level")]
    pub risk_level: i32,
    /// Funding waterfall tranche
    #[serde(default = "default_secured")]
    pub secured: String,
    /// Sponsor equity, percent
    pub sponsor_equity: f64,
    pub moic_em: Option<f64>,
    pub timeline: Option<String>,
    pub exit_strategy: Option<String>,
    pub developer_track_record: Option<String>,
    pub website: Option<String>,
    pub preapproved_facility: Option<String>,
    pub brand_partnership: Option<String>,
}

impl CreateProjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        if self.location.trim().is_empty() {
            return Err("Location is required".to_string());
        }
        validate_project_type(&self.project_type)?;
        validate_secured(&self.secured)?;
        validate_numeric_ranges(
            self.budget,
            self.funding,
            self.irr,
            self.risk_level,
            self.sponsor_equity,
            self.duration,
        )
    }
}

/// Request body for PUT /api/projects/{id}; only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_type: Option<String>,
    pub budget: Option<f64>,
    pub funding: Option<f64>,
    pub duration: Option<i32>,
    pub irr: Option<f64>,
    pub location: Option<String>,
    pub location_type: Option<String>,
    pub risk_level: Option<i32>,
    pub secured: Option<String>,
    pub sponsor_equity: Option<f64>,
    pub moic_em: Option<f64>,
    pub timeline: Option<String>,
    pub exit_strategy: Option<String>,
    pub developer_track_record: Option<String>,
    pub website: Option<String>,
    pub preapproved_facility: Option<String>,
    pub brand_partnership: Option<String>,
}

impl UpdateProjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("Title cannot be empty".to_string());
            }
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err("Description cannot be empty".to_string());
            }
        }
        if let Some(location) = &self.location {
            if location.trim().is_empty() {
                return Err("Location cannot be empty".to_string());
            }
        }
        if let Some(project_type) = &self.project_type {
            validate_project_type(project_type)?;
        }
        if let Some(secured) = &self.secured {
            validate_secured(secured)?;
        }
        if let Some(budget) = self.budget {
            if budget <= 0.0 {
                return Err("Budget must be positive".to_string());
            }
        }
        if let Some(funding) = self.funding {
            if funding <= 0.0 {
                return Err("Funding must be positive".to_string());
            }
        }
        if let Some(irr) = self.irr {
            if !(0.0..=100.0).contains(&irr) {
                return Err("IRR must be between 0 and 100".to_string());
            }
        }
        if let Some(risk_level) = self.risk_level {
            if !(1..=10).contains(&risk_level) {
                return Err("Risk level must be between 1 and 10".to_string());
            }
        }
        if let Some(sponsor_equity) = self.sponsor_equity {
            if !(0.0..=100.0).contains(&sponsor_equity) {
                return Err("Sponsor equity must be between 0 and 100".to_string());
            }
        }
        if let Some(duration) = self.duration {
            if duration < 1 {
                return Err("Duration must be at least 1 month".to_string());
            }
        }
        Ok(())
    }
}

fn validate_project_type(value: &str) -> Result<(), String> {
    if PROJECT_TYPES.contains(&value.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Project type must be one of: {}",
            PROJECT_TYPES.join(", ")
        ))
    }
}

fn validate_secured(value: &str) -> Result<(), String> {
    if SECURED_TRANCHES.contains(&value.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Funding waterfall must be one of: {}",
            SECURED_TRANCHES.join(", ")
        ))
    }
}

fn validate_numeric_ranges(
    budget: f64,
    funding: f64,
    irr: f64,
    risk_level: i32,
    sponsor_equity: f64,
    duration: Option<i32>,
) -> Result<(), String> {
    if budget <= 0.0 {
        return Err("Budget must be positive".to_string());
    }
    if funding <= 0.0 {
        return Err("Funding must be positive".to_string());
    }
    if !(0.0..=100.0).contains(&irr) {
        return Err("IRR must be between 0 and 100".to_string());
    }
    if !(1..=10).contains(&risk_level) {
        return Err("Risk level must be between 1 and 10".to_string());
    }
    if !(0.0..=100.0).contains(&sponsor_equity) {
        return Err("Sponsor equity must be between 0 and 100".to_string());
    }
    if let Some(duration) = duration {
        if duration < 1 {
            return Err("Duration must be at least 1 month".to_string());
        }
    }
    Ok(())
}

/// A project listing as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub budget: f64,
    pub funding: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    pub irr: f64,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    pub risk_level: i32,
    pub secured: String,
    pub sponsor_equity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moic_em: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_track_record: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preapproved_facility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_partnership: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_path: Option<String>,
    /// Download URL derived from the stored filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    pub user_id: i32,
    pub created_at: String,
}

impl From<projects::Model> for ProjectResponse {
    fn from(model: projects::Model) -> Self {
        let attachment_url = model
            .attachment_path
            .as_deref()
            .map(|path| format!("/api/uploads/{}", path));
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            project_type: model.project_type,
            budget: model.budget,
            funding: model.funding,
            duration: model.duration,
            irr: model.irr,
            location: model.location,
            location_type: model.location_type,
            risk_level: model.risk_level,
            secured: model.secured,
            sponsor_equity: model.sponsor_equity,
            moic_em: model.moic_em,
            timeline: model.timeline,
            exit_strategy: model.exit_strategy,
            developer_track_record: model.developer_track_record,
            website: model.website,
            preapproved_facility: model.preapproved_facility,
            brand_partnership: model.brand_partnership,
            attachment_path: model.attachment_path,
            attachment_url,
            user_id: model.user_id,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Detail view: the listing plus whether the caller may edit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub can_edit: bool,
}
