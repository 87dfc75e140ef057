// src/handlers/lead.rs

use axum::{
    Json,
    extract::{Query, State},
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
    models::lead::LeadRequest,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeadPayload {
    pub offer_id: Uuid,

    #[validate(length(min = 2, message = "required"))]
    pub contact_name: String,

    #[validate(length(min = 2, message = "required"))]
    pub contact_company: String,

    #[validate(email(message = "invalid_email"))]
    pub contact_email: String,

    pub contact_phone: Option<String>,
    pub message: Option<String>,

    // Sem consentimento LGPD não há lead
    pub consent: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    pub offer_id: Uuid,

    #[validate(length(min = 2, message = "required"))]
    pub contact_name: String,

    #[validate(length(min = 2, message = "required"))]
    pub contact_company: String,

    #[validate(email(message = "invalid_email"))]
    pub contact_email: String,

    pub contact_phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLeadsQuery {
    pub offer_id: Option<Uuid>,
}

// POST /api/leads/request  (formulário público da oferta)
#[utoipa::path(
    post,
    path = "/api/leads/request",
    tag = "Leads",
    request_body = SubmitLeadPayload,
    responses(
        (status = 201, description = "Lead registrado", body = LeadRequest),
        (status = 400, description = "Dados inválidos ou consentimento ausente"),
        (status = 404, description = "Oferta fora do catálogo")
    )
)]
pub async fn submit_lead_request(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SubmitLeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    if !payload.consent {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new("consent_required");
        err.message = Some("consent_required".into());
        errors.add("consent", err);
        return Err(AppError::ValidationError(errors)
            .to_api_error(&locale, &app_state.i18n_store));
    }

    let lead = app_state
        .lead_service
        .submit_request(
            payload.offer_id,
            &payload.contact_name,
            &payload.contact_company,
            &payload.contact_email,
            payload.contact_phone.as_deref(),
            payload.message.as_deref(),
            payload.consent,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/leads  (fila de roteamento do time comercial)
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    params(("offerId" = Option<Uuid>, Query, description = "Filtro por oferta")),
    responses(
        (status = 200, description = "Leads recebidos, mais recentes primeiro", body = Vec<LeadRequest>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Query(query): Query<ListLeadsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let leads = app_state
        .lead_service
        .list(query.offer_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(leads)))
}

// POST /api/leads  (staff registra lead que chegou por fora)
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead registrado pelo time", body = LeadRequest),
        (status = 404, description = "Oferta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let lead = app_state
        .lead_service
        .create(
            payload.offer_id,
            &payload.contact_name,
            &payload.contact_company,
            &payload.contact_email,
            payload.contact_phone.as_deref(),
            payload.message.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lead)))
}
