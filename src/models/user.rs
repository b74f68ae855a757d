//! Account models: roles, AUM bands, registration/login payloads, profile
//! responses and the preferences document.

use serde::{Deserialize, Serialize};

use crate::entities::users;

/// Account roles. Stored as a lowercase string tag; every permission check
/// goes through this closed enumeration rather than ad hoc string compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Developer,
    Investor,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Developer => write!(f, "developer"),
            Role::Investor => write!(f, "investor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "developer" => Ok(Role::Developer),
            "investor" => Ok(Role::Investor),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Coarse assets-under-management buckets (USD millions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AumBand {
    #[serde(rename = "lt50")]
    Lt50,
    #[serde(rename = "50-100")]
    Band50To100,
    #[serde(rename = "gt100")]
    Gt100,
}

impl std::fmt::Display for AumBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AumBand::Lt50 => write!(f, "lt50"),
            AumBand::Band50To100 => write!(f, "50-100"),
            AumBand::Gt100 => write!(f, "gt100"),
        }
    }
}

impl std::str::FromStr for AumBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lt50" => Ok(AumBand::Lt50),
            "50-100" => Ok(AumBand::Band50To100),
            "gt100" => Ok(AumBand::Gt100),
            _ => Err(format!("Unknown AUM band: {}", s)),
        }
    }
}

/// Normalize an email for storage and lookup: trimmed, lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Request body for POST /api/auth/register
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// "developer" or "investor"; admin accounts are provisioned by admins.
    pub role: String,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub aum_band: Option<String>,
}

impl RegisterRequest {
    /// Validate the registration payload, including the role-specific soft
    /// requirements (developers name a company, investors an AUM band).
    pub fn validate(&self) -> Result<(), String> {
        let email = normalize_email(&self.email);
        if email.is_empty() || !email.contains('@') {
            return Err("A valid email address is required".to_string());
        }
        if self.password.len() < 8 {
            return Err("Password must be at least 8 characters".to_string());
        }
        let role: Role = self
            .role
            .parse()
            .map_err(|_| "Role must be developer or investor".to_string())?;
        match role {
            Role::Admin => return Err("Role must be developer or investor".to_string()),
            Role::Developer => {
                if self
                    .company_name
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .is_empty()
                {
                    return Err("Developers must provide a company name".to_string());
                }
            }
            Role::Investor => {
                let band = self
                    .aum_band
                    .as_deref()
                    .ok_or_else(|| "Investors must provide an AUM band".to_string())?;
                band.parse::<AumBand>()
                    .map_err(|_| "AUM band must be lt50, 50-100 or gt100".to_string())?;
            }
        }
        Ok(())
    }
}

/// Request body for POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account profile as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: i32,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_in_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aum_band: Option<String>,
    pub is_verified: bool,
    pub created_at: String,
}

impl From<users::Model> for ProfileResponse {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            first_name: model.first_name,
            surname: model.surname,
            phone: model.phone,
            company_name: model.company_name,
            position_in_company: model.position_in_company,
            company_website: model.company_website,
            company_address: model.company_address,
            aum_band: model.aum_band,
            is_verified: model.is_verified,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Response for register/login: a bearer token plus the account profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: ProfileResponse,
}

/// Request body for PUT /api/profile; only supplied fields are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub position_in_company: Option<String>,
    pub company_website: Option<String>,
    pub company_address: Option<String>,
    pub aum_band: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(band) = self.aum_band.as_deref() {
            band.parse::<AumBand>()
                .map_err(|_| "AUM band must be lt50, 50-100 or gt100".to_string())?;
        }
        Ok(())
    }
}

/// Investor preferences: known fields with defaults, backed by a generic
/// string-keyed document. Unknown keys round-trip through `extra` so a
/// read-merge-write never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_asset_classes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type_preference: Option<String>,
    /// Target minimum IRR, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_min_irr: Option<f64>,
    /// Ticket size bounds in USD millions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_max: Option<f64>,
    /// Opt-in to email deal digests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_updates: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Preferences {
    /// Decode a stored document; an empty or unreadable document reads as
    /// all-defaults, never a failure.
    pub fn from_document(doc: &serde_json::Value) -> Self {
        serde_json::from_value(doc.clone()).unwrap_or_default()
    }

    pub fn to_document(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Overlay `incoming` onto `self`: supplied known fields win, extra keys
    /// are merged in, and keys absent from `incoming` are preserved.
    pub fn merge_from(&mut self, incoming: Preferences) {
        if incoming.preferred_asset_classes.is_some() {
            self.preferred_asset_classes = incoming.preferred_asset_classes;
        }
        if incoming.location_type_preference.is_some() {
            self.location_type_preference = incoming.location_type_preference;
        }
        if incoming.target_min_irr.is_some() {
            self.target_min_irr = incoming.target_min_irr;
        }
        if incoming.ticket_min.is_some() {
            self.ticket_min = incoming.ticket_min;
        }
        if incoming.ticket_max.is_some() {
            self.ticket_max = incoming.ticket_max;
        }
        if incoming.email_updates.is_some() {
            self.email_updates = incoming.email_updates;
        }
        for (key, value) in incoming.extra {
            self.extra.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_developer() -> RegisterRequest {
        RegisterRequest {
            email: "dev@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            role: "developer".to_string(),
            first_name: None,
            surname: None,
            phone: None,
            company_name: Some("Acme Capital".to_string()),
            aum_band: None,
        }
    }

    #[test]
    fn test_role_round_trip() {
        for role in ["developer", "investor", "admin"] {
            assert_eq!(role.parse::<Role>().unwrap().to_string(), role);
        }
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Dev@Example.COM "), "dev@example.com");
    }

    #[test]
    fn test_register_valid_developer() {
        assert!(valid_developer().validate().is_ok());
    }

    #[test]
    fn test_register_developer_needs_company() {
        let mut req = valid_developer();
        req.company_name = Some("   ".to_string());
        assert!(req.validate().is_err());
        req.company_name = None;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_investor_needs_aum_band() {
        let mut req = valid_developer();
        req.role = "investor".to_string();
        req.company_name = None;
        assert!(req.validate().is_err());
        req.aum_band = Some("mid".to_string());
        assert!(req.validate().is_err());
        req.aum_band = Some("50-100".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_rejects_admin_role() {
        let mut req = valid_developer();
        req.role = "admin".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let mut req = valid_developer();
        req.password = "short".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_preferences_empty_document_reads_as_defaults() {
        let prefs = Preferences::from_document(&json!({}));
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_preferences_merge_preserves_unknown_keys() {
        let mut stored = Preferences::from_document(&json!({
            "target_min_irr": 6.0,
            "legacy_flag": "keep-me"
        }));
        let incoming = Preferences::from_document(&json!({ "target_min_irr": 8.5 }));
        stored.merge_from(incoming);

        let doc = stored.to_document();
        assert_eq!(doc["target_min_irr"], json!(8.5));
        assert_eq!(doc["legacy_flag"], json!("keep-me"));
    }

    #[test]
    fn test_preferences_round_trip() {
        let prefs = Preferences::from_document(&json!({
            "preferred_asset_classes": "residential, industrial",
            "email_updates": true,
            "custom": 1
        }));
        let doc = prefs.to_document();
        assert_eq!(doc["preferred_asset_classes"], json!("residential, industrial"));
        assert_eq!(doc["email_updates"], json!(true));
        assert_eq!(doc["custom"], json!(1));
    }
}
