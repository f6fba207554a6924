//! Question Table Route
//!
//! The table update: selection in, question rows plus net highlights out.
//!
//! - GET /api/questions?category=

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::CategoryParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::polls::QuestionTable;

/// GET /api/questions
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> ApiResult<Json<QuestionTable>> {
    let selection = params.selection()?;
    let table = state.dataset.questions(&selection);
    tracing::debug!(selection = %selection, rows = table.rows.len(), "Table update");
    Ok(Json(table))
}
