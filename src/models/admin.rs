//! Admin reporting models: counts, recent-record queries, exports and
//! account administration payloads.

use serde::{Deserialize, Serialize};

use crate::entities::users;

/// Entities available to the admin recent/export endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportEntity {
    Users,
    Projects,
    NdaRequests,
    CallbackRequests,
}

impl std::fmt::Display for ExportEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportEntity::Users => write!(f, "users"),
            ExportEntity::Projects => write!(f, "projects"),
            ExportEntity::NdaRequests => write!(f, "nda_requests"),
            ExportEntity::CallbackRequests => write!(f, "callback_requests"),
        }
    }
}

impl std::str::FromStr for ExportEntity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(ExportEntity::Users),
            "projects" => Ok(ExportEntity::Projects),
            "nda_requests" => Ok(ExportEntity::NdaRequests),
            "callback_requests" => Ok(ExportEntity::CallbackRequests),
            _ => Err(format!("Unknown entity: {}", s)),
        }
    }
}

/// Response for GET /api/admin/counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountsResponse {
    pub users: i64,
    pub projects: i64,
    pub nda_requests: i64,
    pub callback_requests: i64,
}

/// Query parameters for GET /api/admin/recent/{entity}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentQuery {
    /// Number of records to return (default: 10, max: 100)
    pub n: Option<u64>,
}

impl RecentQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(n) = self.n {
            if n < 1 {
                return Err("n must be at least 1".to_string());
            }
            if n > 100 {
                return Err("n cannot exceed 100".to_string());
            }
        }
        Ok(())
    }

    pub fn n(&self) -> u64 {
        self.n.unwrap_or(10)
    }
}

/// Account row for admin listings; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aum_band: Option<String>,
    pub is_verified: bool,
    pub created_at: String,
}

impl From<users::Model> for UserSummary {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            company_name: model.company_name,
            aum_band: model.aum_band,
            is_verified: model.is_verified,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Request body for PUT /api/admin/users/{id}/role
#[derive(Debug, Clone, Deserialize)]
pub struct RoleChangeRequest {
    pub role: String,
}

/// Request body for PUT /api/admin/users/{id}/verified
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedChangeRequest {
    pub is_verified: bool,
}
