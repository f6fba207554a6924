//! Summary Routes
//!
//! - GET /api/summary - Per-category means, best net first, with highlights
//! - GET /api/categories - Selector options

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::CategoriesResponse;
use crate::api::state::AppState;
use crate::polls::SummaryTable;

/// GET /api/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryTable> {
    Json(state.dataset.summary_table())
}

/// GET /api/categories
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse::new(state.dataset.selector_options()))
}
