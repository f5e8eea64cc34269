use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{dto::TipRequest, repo_types::SavingsTip};
use crate::{error::ApiError, state::AppState, validation::ValidatedJson};

const NOT_FOUND: &str = "Dica não encontrada";

pub fn tip_routes() -> Router<AppState> {
    Router::new()
        .route("/api/DicasEconomia", get(list_tips).post(create_tip))
        .route(
            "/api/DicasEconomia/:id",
            get(get_tip).put(update_tip).delete(delete_tip),
        )
}

#[instrument(skip(state))]
pub async fn list_tips(State(state): State<AppState>) -> Result<Json<Vec<SavingsTip>>, ApiError> {
    Ok(Json(state.tips.get_all().await?))
}

#[instrument(skip(state))]
pub async fn get_tip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SavingsTip>, ApiError> {
    let Some(tip) = state.tips.get_by_id(id).await? else {
        warn!(%id, "tip not found");
        return Err(ApiError::NotFound(NOT_FOUND));
    };
    Ok(Json(tip))
}

#[instrument(skip(state, payload))]
pub async fn create_tip(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (title, description) = payload.into_fields();
    let tip = state.tips.add(SavingsTip::new(title, description)).await?;
    info!(tip_id = tip.id, "tip created");

    let location = format!("/api/DicasEconomia/{}", tip.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(tip)))
}

#[instrument(skip(state, payload))]
pub async fn update_tip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<TipRequest>,
) -> Result<StatusCode, ApiError> {
    let Some(mut tip) = state.tips.get_by_id(id).await? else {
        warn!(%id, "update of missing tip");
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    let (title, description) = payload.into_fields();
    tip.title = title;
    tip.description = description;

    if !state.tips.update(&tip).await? {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    info!(tip_id = id, "tip updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_tip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let Some(tip) = state.tips.get_by_id(id).await? else {
        warn!(%id, "delete of missing tip");
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    if !state.tips.delete(&tip).await? {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    info!(tip_id = id, "tip deleted");
    Ok(StatusCode::NO_CONTENT)
}
