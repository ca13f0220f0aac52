use crate::contrast::{contrast_color_for, relative_luminance};
use crate::errors::AppError;
use crate::form::{recalculate as run_recalculate, reset as run_reset};
use crate::models::{
    ContrastQuery, ContrastResponse, LayoutResponse, RecalculateRequest, RecalculateResponse,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let defaults = run_reset(&state.layout, state.policy)?;
    Ok(Html(render_index(&state.layout, &defaults)))
}

pub async fn get_layout(State(state): State<AppState>) -> Result<Json<LayoutResponse>, AppError> {
    let defaults = run_reset(&state.layout, state.policy)?;
    Ok(Json(LayoutResponse {
        layout: state.layout.as_ref().clone(),
        defaults,
    }))
}

pub async fn recalculate(
    State(state): State<AppState>,
    Json(payload): Json<RecalculateRequest>,
) -> Result<Json<RecalculateResponse>, AppError> {
    debug!(fields = payload.values.len(), source = ?payload.source, "recalculating");
    let response = run_recalculate(&state.layout, state.policy, &payload.values, payload.source)?;
    Ok(Json(response))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<RecalculateResponse>, AppError> {
    Ok(Json(run_reset(&state.layout, state.policy)?))
}

pub async fn contrast(Query(query): Query<ContrastQuery>) -> Result<Json<ContrastResponse>, AppError> {
    let color = query.color.trim();
    if color.is_empty() {
        return Err(AppError::bad_request("color must not be empty"));
    }

    let contrast = contrast_color_for(color)?;
    let luminance = relative_luminance(color)?;
    Ok(Json(ContrastResponse {
        color: color.to_string(),
        contrast: contrast.to_string(),
        luminance,
    }))
}
