use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{ConsumptionRequest, ConsumptionResponse},
    repo_types::ConsumptionRecord,
};
use crate::{error::ApiError, state::AppState, validation::ValidatedJson};

const NOT_FOUND: &str = "Consumo energético não encontrado";

pub fn consumption_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/ConsumoEnergetico",
            get(list_consumption).post(create_consumption),
        )
        .route(
            "/api/ConsumoEnergetico/:id",
            get(get_consumption)
                .put(update_consumption)
                .delete(delete_consumption),
        )
}

#[instrument(skip(state))]
pub async fn list_consumption(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConsumptionResponse>>, ApiError> {
    let records = state.consumption.get_all().await?;
    Ok(Json(records.into_iter().map(ConsumptionResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_consumption(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ConsumptionResponse>, ApiError> {
    let Some(record) = state.consumption.get_by_id(id).await? else {
        warn!(%id, "consumption record not found");
        return Err(ApiError::NotFound(NOT_FOUND));
    };
    Ok(Json(record.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_consumption(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ConsumptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let f = payload.into_fields();
    let record = state
        .consumption
        .add(ConsumptionRecord::new(f.month, f.year, f.consumption_kwh, f.user_id))
        .await?;
    info!(record_id = record.id, user_id = record.user_id, "consumption recorded");

    let location = format!("/api/ConsumoEnergetico/{}", record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ConsumptionResponse::from(record)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_consumption(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ConsumptionRequest>,
) -> Result<StatusCode, ApiError> {
    let Some(mut record) = state.consumption.get_by_id(id).await? else {
        warn!(%id, "update of missing consumption record");
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    let f = payload.into_fields();
    record.month = f.month;
    record.year = f.year;
    record.consumption_kwh = f.consumption_kwh;
    record.user_id = f.user_id;

    if !state.consumption.update(&record).await? {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    info!(record_id = id, "consumption updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_consumption(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let Some(record) = state.consumption.get_by_id(id).await? else {
        warn!(%id, "delete of missing consumption record");
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    if !state.consumption.delete(&record).await? {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    info!(record_id = id, "consumption deleted");
    Ok(StatusCode::NO_CONTENT)
}
