use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use super::model::{ModelInput, ModelOutput};
use crate::{error::ApiError, state::AppState, validation::ValidatedJson};

pub fn predict_routes() -> Router<AppState> {
    Router::new().route("/predict", post(predict))
}

#[instrument(skip(state, input))]
pub async fn predict(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ModelInput>,
) -> Result<Json<ModelOutput>, ApiError> {
    let output = state
        .predictor
        .predict(&input)
        .map_err(|e| ApiError::field("consumosKWh", e.to_string()))?;
    info!(prediction = output.consumo_previsto_kwh, "prediction served");
    Ok(Json(output))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{send, TestApp};

    #[tokio::test]
    async fn predicts_from_history() {
        let app = TestApp::new();
        let (status, _, body) = send(
            &app.router,
            "POST",
            "/predict",
            Some(json!({"consumosKWh": [100.0, 110.0, 120.0]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let predicted = body["consumoPrevistoKWh"].as_f64().unwrap();
        assert!((predicted - 130.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_history_is_a_validation_error() {
        let app = TestApp::new();
        let (status, _, body) =
            send(&app.router, "POST", "/predict", Some(json!({"consumosKWh": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["consumosKWh"].is_array());
    }

    #[tokio::test]
    async fn negative_history_is_a_validation_error() {
        let app = TestApp::new();
        let (status, _, body) = send(
            &app.router,
            "POST",
            "/predict",
            Some(json!({"consumosKWh": [-500.0, -400.0]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["consumosKWh"][0], "O consumo não pode ser negativo.");
    }

    #[tokio::test]
    async fn overflowing_history_is_a_validation_error() {
        let app = TestApp::new();
        let (status, _, body) = send(
            &app.router,
            "POST",
            "/predict",
            Some(json!({"consumosKWh": [0.0, 1e308, 1e308]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["consumosKWh"].is_array());
    }
}
