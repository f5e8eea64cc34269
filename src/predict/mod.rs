pub mod handlers;
pub mod model;

use crate::state::AppState;
use axum::Router;

pub use model::{LinearTrendPredictor, Predictor};

pub fn router() -> Router<AppState> {
    handlers::predict_routes()
}
