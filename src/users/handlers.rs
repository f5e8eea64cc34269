use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{UserRequest, UserResponse},
    repo_types::User,
};
use crate::{error::ApiError, notifications, state::AppState, validation::ValidatedJson};

const NOT_FOUND: &str = "Usuário não encontrado";

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/Usuario", get(list_users).post(create_user))
        .route(
            "/api/Usuario/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.get_all_with_consumption().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    match state.users.get_by_id_with_consumption(id).await? {
        Some(user) => Ok(Json(user.into())),
        None => {
            warn!(%id, "user not found");
            Err(ApiError::NotFound(NOT_FOUND))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (firebase_id, name, email) = payload.into_fields();
    let user = state.users.add(User::new(firebase_id, name, email)).await?;
    info!(user_id = user.id, email = %user.email, "user created");

    notifications::send_welcome(state.mailer.clone(), user.email.clone(), user.name.clone());

    let location = format!("/api/Usuario/{}", user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserResponse::from(user)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> Result<StatusCode, ApiError> {
    let Some(mut user) = state.users.get_by_id(id).await? else {
        warn!(%id, "update of missing user");
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    let (firebase_id, name, email) = payload.into_fields();
    user.firebase_id = firebase_id;
    user.name = name;
    user.email = email;

    if !state.users.update(&user).await? {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    info!(user_id = id, "user updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let Some(user) = state.users.get_by_id(id).await? else {
        warn!(%id, "delete of missing user");
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    if !state.users.delete(&user).await? {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    info!(user_id = id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
