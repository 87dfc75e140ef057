// src/handlers/partner_case.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{RequireRole, StaffOnly},
    },
    models::partner_case::PartnerCase,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CasePayload {
    pub partner_id: Uuid,

    #[validate(length(min = 3, message = "required"))]
    #[schema(example = "Implantação de CRM em 90 dias")]
    pub title: String,

    #[validate(length(min = 2, message = "required"))]
    pub client_name: String,

    pub segment: Option<String>,

    #[validate(length(min = 10, message = "summary_too_short"))]
    pub summary: String,

    pub results: Option<String>,

    #[serde(default)]
    pub position: i32,
}

// GET /api/cases/partner/{id}  (público, alimenta o perfil)
#[utoipa::path(
    get,
    path = "/api/cases/partner/{id}",
    tag = "Cases",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    responses(
        (status = 200, description = "Cases de sucesso do parceiro", body = Vec<PartnerCase>)
    )
)]
pub async fn list_partner_cases(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(partner_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let cases = app_state
        .case_service
        .list_by_partner(partner_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cases)))
}

// GET /api/cases  (admin)
#[utoipa::path(
    get,
    path = "/api/cases",
    tag = "Cases",
    responses(
        (status = 200, description = "Todos os cases da plataforma", body = Vec<PartnerCase>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_all_cases(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let cases = app_state
        .case_service
        .list_all()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cases)))
}

// POST /api/cases
#[utoipa::path(
    post,
    path = "/api/cases",
    tag = "Cases",
    request_body = CasePayload,
    responses(
        (status = 201, description = "Case criado", body = PartnerCase),
        (status = 404, description = "Parceiro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_case(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Json(payload): Json<CasePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let case = app_state
        .case_service
        .create(
            payload.partner_id,
            &payload.title,
            &payload.client_name,
            payload.segment.as_deref(),
            &payload.summary,
            payload.results.as_deref(),
            payload.position,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(case)))
}

// PUT /api/cases/{id}
#[utoipa::path(
    put,
    path = "/api/cases/{id}",
    tag = "Cases",
    params(("id" = Uuid, Path, description = "ID do case")),
    request_body = CasePayload,
    responses(
        (status = 200, description = "Case atualizado", body = PartnerCase),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_case(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CasePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let case = app_state
        .case_service
        .update(
            id,
            &payload.title,
            &payload.client_name,
            payload.segment.as_deref(),
            &payload.summary,
            payload.results.as_deref(),
            payload.position,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(case)))
}

// DELETE /api/cases/{id}
#[utoipa::path(
    delete,
    path = "/api/cases/{id}",
    tag = "Cases",
    params(("id" = Uuid, Path, description = "ID do case")),
    responses(
        (status = 204, description = "Case removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_case(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .case_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
