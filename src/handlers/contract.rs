// src/handlers/contract.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
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
    models::{
        auth::AuthContext,
        contract::{ContractDeclaration, ReviewEligibility},
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeclareContractPayload {
    pub offer_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-03-15")]
    pub contract_date: NaiveDate,

    // Centavos
    #[validate(range(min = 0, message = "invalid_value"))]
    #[schema(example = 2_400_000i64)]
    pub contract_value: i64,

    #[schema(example = "12 meses")]
    pub contract_period: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityQuery {
    pub offer_id: Uuid,
}

// POST /api/contracts
#[utoipa::path(
    post,
    path = "/api/contracts",
    tag = "Contracts",
    request_body = DeclareContractPayload,
    responses(
        (status = 201, description = "Declaração registrada (PENDING)", body = ContractDeclaration),
        (status = 404, description = "Oferta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn declare_contract(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<DeclareContractPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let actor = AuthContext::from_user(&user.0);

    let contract = app_state
        .contract_service
        .declare(
            &actor,
            payload.offer_id,
            payload.contract_date,
            payload.contract_value,
            payload.contract_period.as_deref(),
            payload.comments.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(contract)))
}

// GET /api/contracts/eligibility
#[utoipa::path(
    get,
    path = "/api/contracts/eligibility",
    tag = "Contracts",
    params(("offerId" = Uuid, Query, description = "Oferta que o usuário quer avaliar")),
    responses(
        (status = 200, description = "Pode avaliar? Re-derivado do estado atual dos contratos", body = ReviewEligibility)
    ),
    security(("api_jwt" = []))
)]
pub async fn check_eligibility(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<EligibilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let eligibility = app_state
        .contract_service
        .check_eligibility(&actor, query.offer_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(eligibility)))
}

// GET /api/contracts/pending
#[utoipa::path(
    get,
    path = "/api/contracts/pending",
    tag = "Contracts",
    responses(
        (status = 200, description = "Fila de declarações aguardando análise", body = Vec<ContractDeclaration>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_pending(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let contracts = app_state
        .contract_service
        .list_pending()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(contracts)))
}

// POST /api/contracts/{id}/approve
#[utoipa::path(
    post,
    path = "/api/contracts/{id}/approve",
    tag = "Contracts",
    params(("id" = Uuid, Path, description = "ID da declaração")),
    responses(
        (status = 200, description = "Declaração aprovada", body = ContractDeclaration),
        (status = 404, description = "Não encontrada ou já decidida")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_contract(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let contract = app_state
        .contract_service
        .approve(&actor, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(contract)))
}

// POST /api/contracts/{id}/reject
#[utoipa::path(
    post,
    path = "/api/contracts/{id}/reject",
    tag = "Contracts",
    params(("id" = Uuid, Path, description = "ID da declaração")),
    responses(
        (status = 200, description = "Declaração rejeitada", body = ContractDeclaration),
        (status = 404, description = "Não encontrada ou já decidida")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_contract(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let contract = app_state
        .contract_service
        .reject(&actor, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(contract)))
}
