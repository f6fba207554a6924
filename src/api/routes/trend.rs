//! Trend Routes
//!
//! The trend update: selection in, yes/no line chart out.
//!
//! - GET /api/trend?category= - Figure as JSON
//! - GET /api/trend.svg?category= - Figure rendered as SVG

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::dto::CategoryParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::polls::Selection;
use crate::web::{render_svg, TrendFigure};

fn build_figure(state: &AppState, selection: &Selection) -> TrendFigure {
    let rows = state.dataset.trend_source(selection);
    tracing::debug!(selection = %selection, points = rows.len(), "Trend update");
    TrendFigure::build(selection, &rows)
}

/// GET /api/trend
pub async fn trend_figure(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> ApiResult<Json<TrendFigure>> {
    let selection = params.selection()?;
    Ok(Json(build_figure(&state, &selection)))
}

/// GET /api/trend.svg
pub async fn trend_svg(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> ApiResult<impl IntoResponse> {
    let selection = params.selection()?;
    let svg = render_svg(&build_figure(&state, &selection))?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
