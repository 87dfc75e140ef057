// src/handlers/review.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, StaffOnly},
    },
    models::{auth::AuthContext, review::Review},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewPayload {
    pub partner_id: Uuid,

    #[validate(length(min = 2, message = "required"))]
    pub reviewer_name: String,

    #[validate(length(min = 2, message = "required"))]
    pub reviewer_company: String,

    #[validate(range(min = 1, max = 5, message = "invalid_rating"))]
    #[schema(example = 5)]
    pub rating: i16,

    #[serde(default)]
    pub comment: String,
}

// POST /api/reviews
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    request_body = CreateReviewPayload,
    responses(
        (status = 201, description = "Avaliação criada", body = Review),
        (status = 403, description = "Sem contrato aprovado com o parceiro (e sem oferta de checkout)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_review(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateReviewPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let actor = AuthContext::from_user(&user.0);

    let review = app_state
        .review_service
        .create(
            &actor,
            payload.partner_id,
            &payload.reviewer_name,
            &payload.reviewer_company,
            payload.rating,
            &payload.comment,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(review)))
}

// GET /api/reviews  (admin)
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "Todas as avaliações da plataforma", body = Vec<Review>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_all_reviews(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = app_state
        .review_service
        .list_all()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(reviews)))
}

// GET /api/reviews/partner/{id}  (público: lista + agregado)
#[utoipa::path(
    get,
    path = "/api/reviews/partner/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    responses(
        (status = 200, description = "Avaliações do parceiro com média e contagem")
    )
)]
pub async fn list_partner_reviews(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(partner_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = app_state
        .review_service
        .list_by_partner(partner_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let summary = app_state
        .review_service
        .summary_for_partner(partner_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "summary": summary,
            "reviews": reviews,
        })),
    ))
}
