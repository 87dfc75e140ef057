// src/handlers/referral.rs

use axum::{
    Json,
    extract::{Path, Query, State},
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
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        auth::AuthContext,
        referral::{Referral, ReferralListEntry, ReferralStatus},
    },
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReferralPayload {
    pub offer_id: Uuid,

    #[validate(length(min = 2, message = "required"))]
    #[schema(example = "João Pereira")]
    pub buyer_name: String,

    #[validate(length(min = 2, message = "required"))]
    #[schema(example = "Pereira Distribuidora")]
    pub buyer_company: String,

    #[validate(email(message = "invalid_email"))]
    pub buyer_email: String,

    pub buyer_phone: Option<String>,

    // Centavos; a comissão prevista é congelada na criação
    #[validate(range(min = 0, message = "invalid_value"))]
    #[schema(example = 10_000i64)]
    pub expected_value: i64,

    pub internal_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReferralStatusPayload {
    // Escrita otimista: a version lida pelo cliente
    pub version: i32,

    pub status: ReferralStatus,

    // Obrigatório (e >= 0) quando status = WON
    #[validate(range(min = 0, message = "invalid_value"))]
    pub won_value: Option<i64>,

    pub internal_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReferralsQuery {
    pub partner_id: Option<Uuid>,
    pub status: Option<ReferralStatus>,
}

// =============================================================================
//  HANDLERS
// =============================================================================

// POST /api/referrals
#[utoipa::path(
    post,
    path = "/api/referrals",
    tag = "Referrals",
    request_body = CreateReferralPayload,
    responses(
        (status = 201, description = "Indicação criada em SENT, com prazo de aceite", body = Referral),
        (status = 403, description = "Somente admin/gerente criam indicações"),
        (status = 404, description = "Oferta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_referral(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateReferralPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let actor = AuthContext::from_user(&user.0);

    let referral = app_state
        .referral_service
        .create(
            &actor,
            payload.offer_id,
            &payload.buyer_name,
            &payload.buyer_company,
            &payload.buyer_email,
            payload.buyer_phone.as_deref(),
            payload.expected_value,
            payload.internal_notes.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(referral)))
}

// GET /api/referrals
#[utoipa::path(
    get,
    path = "/api/referrals",
    tag = "Referrals",
    params(
        ("partnerId" = Option<Uuid>, Query, description = "Filtro por parceiro (staff)"),
        ("status" = Option<ReferralStatus>, Query, description = "Filtro por status")
    ),
    responses(
        (status = 200, description = "Indicações visíveis para o usuário", body = Vec<ReferralListEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_referrals(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<ListReferralsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let referrals = app_state
        .referral_service
        .list(&actor, query.partner_id, query.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(referrals)))
}

// PATCH /api/referrals/{id}/status
#[utoipa::path(
    patch,
    path = "/api/referrals/{id}/status",
    tag = "Referrals",
    params(("id" = Uuid, Path, description = "ID da indicação")),
    request_body = UpdateReferralStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Referral),
        (status = 400, description = "wonValue ausente ao marcar WON"),
        (status = 409, description = "Version desatualizada (escrita concorrente)"),
        (status = 422, description = "Transição de status inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_referral_status(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReferralStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let actor = AuthContext::from_user(&user.0);

    let referral = app_state
        .referral_service
        .update_status(
            &actor,
            id,
            payload.version,
            payload.status,
            payload.won_value,
            payload.internal_notes.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(referral)))
}
