//! NDA and callback request payloads and responses.

use serde::{Deserialize, Serialize};

use crate::entities::{callback_requests, nda_requests};

/// Request body for POST /api/requests/nda
#[derive(Debug, Clone, Deserialize)]
pub struct NdaRequestPayload {
    /// Referenced project, stored without validation (weak reference).
    pub project_id: Option<i32>,
    pub company: String,
    pub contact_name: String,
    pub contact_email: String,
    pub message: Option<String>,
}

impl NdaRequestPayload {
    pub fn validate(&self) -> Result<(), String> {
        if self.company.trim().is_empty() {
            return Err("Company is required".to_string());
        }
        if self.contact_name.trim().is_empty() {
            return Err("Contact name is required".to_string());
        }
        let email = self.contact_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("A valid contact email is required".to_string());
        }
        Ok(())
    }
}

/// Request body for POST /api/requests/callback
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackRequestPayload {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub message: Option<String>,
}

impl CallbackRequestPayload {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.company.trim().is_empty() {
            return Err("Company is required".to_string());
        }
        if self.phone.trim().is_empty() {
            return Err("Phone is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("A valid email is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NdaRequestResponse {
    pub id: i32,
    pub user_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i32>,
    pub company: String,
    pub contact_name: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: String,
}

impl From<nda_requests::Model> for NdaRequestResponse {
    fn from(model: nda_requests::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            project_id: model.project_id,
            company: model.company,
            contact_name: model.contact_name,
            contact_email: model.contact_email,
            message: model.message,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackRequestResponse {
    pub id: i32,
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: String,
}

impl From<callback_requests::Model> for CallbackRequestResponse {
    fn from(model: callback_requests::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            company: model.company,
            phone: model.phone,
            email: model.email,
            message: model.message,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}
