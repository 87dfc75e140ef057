// src/handlers/favorite.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::favorite::FavoriteEntry,
};

// GET /api/favorites
#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = "Favorites",
    responses(
        (status = 200, description = "Ofertas favoritas do usuário", body = Vec<FavoriteEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_favorites(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let favorites = app_state
        .favorite_repo
        .list(user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(favorites)))
}

// POST /api/favorites/{offer_id}
#[utoipa::path(
    post,
    path = "/api/favorites/{offer_id}",
    tag = "Favorites",
    params(("offer_id" = Uuid, Path, description = "ID da oferta")),
    responses(
        (status = 204, description = "Oferta favoritada (idempotente)")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_favorite(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .favorite_repo
        .add(user.0.id, offer_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/favorites/{offer_id}
#[utoipa::path(
    delete,
    path = "/api/favorites/{offer_id}",
    tag = "Favorites",
    params(("offer_id" = Uuid, Path, description = "ID da oferta")),
    responses(
        (status = 204, description = "Favorito removido")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .favorite_repo
        .remove(user.0.id, offer_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
