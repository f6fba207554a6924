//! Dashboard Route
//!
//! - GET / - The dashboard page, rendered for the "All" selection

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::polls::Selection;
use crate::web::{render_page, render_svg, PageContext, TrendFigure};

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let dataset = &state.dataset;
    let selection = Selection::All;

    let summary = dataset.summary_table();
    let options = dataset.selector_options();
    let questions = dataset.questions(&selection);
    let figure = TrendFigure::build(&selection, &dataset.trend_source(&selection));
    let chart_svg = render_svg(&figure)?;

    Ok(Html(render_page(&PageContext {
        title: &state.config.title,
        source_url: &state.config.source_page_url,
        base_path: &state.config.path_prefix,
        summary: &summary,
        options: &options,
        questions: &questions,
        chart_svg: &chart_svg,
    })))
}
