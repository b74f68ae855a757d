//! Search request/response models for the project listing page.

use serde::{Deserialize, Serialize};

use super::project::ProjectResponse;

/// Query parameters for GET /api/projects
///
/// Every criterion is independently optional; active criteria are combined
/// with logical AND. An empty query is a valid "match everything" request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Free text matched case-insensitively against title, description or
    /// location.
    pub q: Option<String>,
    /// Keep listings with irr >= this threshold (percent).
    pub min_irr: Option<f64>,
    /// Exact match on the location_type column.
    pub location_type: Option<String>,
    /// Comma-separated set of locations.
    pub locations: Option<String>,
    /// Maximum number of results (1-100); absent returns the full set.
    pub limit: Option<u64>,
    /// Offset for pagination (default: 0).
    pub offset: Option<u64>,
}

impl SearchQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.limit {
            if limit < 1 {
                return Err("limit must be at least 1".to_string());
            }
            if limit > 100 {
                return Err("limit cannot exceed 100".to_string());
            }
        }
        if let Some(min_irr) = self.min_irr {
            if !(0.0..=100.0).contains(&min_irr) {
                return Err("min_irr must be between 0 and 100".to_string());
            }
        }
        Ok(())
    }

    /// The free-text criterion, if non-blank.
    pub fn text(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// The location-type criterion, if non-blank.
    pub fn location_type(&self) -> Option<&str> {
        self.location_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Parse the comma-separated location set, dropping blanks.
    pub fn location_set(&self) -> Vec<String> {
        self.locations
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Response for GET /api/projects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub projects: Vec<ProjectResponse>,
    /// Total count matching the criteria (for pagination).
    pub total: i64,
    /// Distinct locations currently present in the store, ascending; feeds
    /// the location filter control.
    pub locations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_valid() {
        assert!(SearchQuery::default().validate().is_ok());
    }

    #[test]
    fn test_limit_bounds() {
        let query = SearchQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = SearchQuery {
            limit: Some(101),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = SearchQuery {
            limit: Some(100),
            ..Default::default()
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_blank_text_is_inactive() {
        let query = SearchQuery {
            q: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.text(), None);
    }

    #[test]
    fn test_location_set_parsing() {
        let query = SearchQuery {
            locations: Some(" Manchester, Leeds ,,London ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.location_set(), vec!["Manchester", "Leeds", "London"]);
    }
}
