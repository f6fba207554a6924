//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::polls::{Selection, ALL_CATEGORIES};

// ============================================
// SELECTION DTOs
// ============================================

/// `?category=` query parameter shared by the selection endpoints
#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    /// Selector value, "All" when absent
    #[serde(default)]
    pub category: Option<String>,
}

impl CategoryParams {
    /// Resolve the selection; an empty value is rejected
    pub fn selection(&self) -> ApiResult<Selection> {
        match self.category.as_deref() {
            None => Ok(Selection::All),
            Some(value) if value.trim().is_empty() => Err(ApiError::Validation(
                "category must not be empty".to_string(),
            )),
            Some(value) => Ok(Selection::parse(value)),
        }
    }
}

/// Selector options response
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    /// "All" followed by every category
    pub options: Vec<String>,
    /// Initially selected option
    pub default: String,
}

impl CategoriesResponse {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            default: ALL_CATEGORIES.to_string(),
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", "degraded"
    pub status: String,
    /// Number of poll rows loaded
    pub rows: usize,
    /// Number of distinct categories
    pub categories: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
    /// Verbose mode
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_params() {
        let params = CategoryParams::default();
        assert_eq!(params.selection().unwrap(), Selection::All);

        let params = CategoryParams {
            category: Some("Economy".to_string()),
        };
        assert_eq!(
            params.selection().unwrap(),
            Selection::Category("Economy".to_string())
        );

        let params = CategoryParams {
            category: Some("  ".to_string()),
        };
        assert!(params.selection().is_err());
    }
}
