// src/handlers/partner.rs

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
    db::partner_repo::PartnerProfilePatch,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{AdminOnly, RequireRole, StaffOnly},
    },
    models::{
        auth::AuthContext,
        partner::{CnpjRecord, CurationStatus, Partner, PartnerPublicProfile, PartnerTier},
    },
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerPayload {
    #[validate(length(min = 2, message = "required"))]
    #[schema(example = "Acme Tecnologia")]
    pub company_name: String,

    #[validate(length(min = 2, message = "required"))]
    #[schema(example = "Acme Tecnologia LTDA")]
    pub legal_name: String,

    // Com ou sem máscara; a validação de dígito roda no service
    #[schema(example = "11.222.333/0001-81")]
    pub cnpj: String,

    #[validate(length(min = 2, message = "required"))]
    pub contact_name: String,

    #[validate(email(message = "invalid_email"))]
    pub contact_email: String,

    pub contact_phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerProfilePayload {
    // Escrita otimista: o cliente manda a version que leu
    pub version: i32,

    #[validate(length(min = 2, message = "required"))]
    pub company_name: String,

    #[validate(length(min = 2, message = "required"))]
    pub contact_name: String,

    #[validate(email(message = "invalid_email"))]
    pub contact_email: String,

    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub cnae_principal: Option<String>,

    #[serde(default)]
    pub cnae_secundario: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCurationPayload {
    pub status: CurationStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTierPayload {
    pub tier: PartnerTier,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPartnersQuery {
    pub status: Option<CurationStatus>,
}

// =============================================================================
//  HANDLERS
// =============================================================================

// POST /api/partners
#[utoipa::path(
    post,
    path = "/api/partners",
    tag = "Partners",
    request_body = CreatePartnerPayload,
    responses(
        (status = 201, description = "Parceiro cadastrado (entra PENDING na curadoria)", body = Partner),
        (status = 400, description = "Dados ou CNPJ inválidos"),
        (status = 409, description = "CNPJ já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_partner(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Json(payload): Json<CreatePartnerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let partner = app_state
        .partner_service
        .create(
            &payload.company_name,
            &payload.legal_name,
            &payload.cnpj,
            &payload.contact_name,
            &payload.contact_email,
            payload.contact_phone.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(partner)))
}

// GET /api/partners
#[utoipa::path(
    get,
    path = "/api/partners",
    tag = "Partners",
    params(("status" = Option<CurationStatus>, Query, description = "Filtro por status de curadoria")),
    responses(
        (status = 200, description = "Lista de parceiros", body = Vec<Partner>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_partners(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Query(query): Query<ListPartnersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let partners = app_state
        .partner_service
        .list(query.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(partners)))
}

// GET /api/partners/{id}
#[utoipa::path(
    get,
    path = "/api/partners/{id}",
    tag = "Partners",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    responses(
        (status = 200, description = "Parceiro completo", body = Partner),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_partner(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    // Visão completa: staff ou o próprio parceiro
    let actor = AuthContext::from_user(&user.0);
    if !actor.is_staff() && !actor.owns_partner(id) {
        return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
    }

    let partner = app_state
        .partner_service
        .get(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(partner)))
}

// GET /api/partners/{id}/profile  (público)
#[utoipa::path(
    get,
    path = "/api/partners/{id}/profile",
    tag = "Partners",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    responses(
        (status = 200, description = "Perfil público (só parceiros aprovados)", body = PartnerPublicProfile),
        (status = 404, description = "Não encontrado ou não aprovado")
    )
)]
pub async fn get_public_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = app_state
        .partner_service
        .get_public_profile(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(profile)))
}

// PUT /api/partners/{id}/profile
#[utoipa::path(
    put,
    path = "/api/partners/{id}/profile",
    tag = "Partners",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    request_body = UpdatePartnerProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = Partner),
        (status = 409, description = "Version desatualizada (escrita concorrente)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePartnerProfilePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let actor = AuthContext::from_user(&user.0);
    let patch = PartnerProfilePatch {
        company_name: &payload.company_name,
        contact_name: &payload.contact_name,
        contact_email: &payload.contact_email,
        contact_phone: payload.contact_phone.as_deref(),
        website: payload.website.as_deref(),
        description: payload.description.as_deref(),
        cnae_principal: payload.cnae_principal.as_deref(),
        cnae_secundario: &payload.cnae_secundario,
    };

    let partner = app_state
        .partner_service
        .update_profile(&actor, id, payload.version, &patch)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(partner)))
}

// PATCH /api/partners/{id}/curation
#[utoipa::path(
    patch,
    path = "/api/partners/{id}/curation",
    tag = "Partners",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    request_body = UpdateCurationPayload,
    responses(
        (status = 200, description = "Status de curadoria atualizado", body = Partner)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_curation(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCurationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let partner = app_state
        .partner_service
        .update_curation_status(id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(partner)))
}

// PATCH /api/partners/{id}/tier
#[utoipa::path(
    patch,
    path = "/api/partners/{id}/tier",
    tag = "Partners",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    request_body = UpdateTierPayload,
    responses(
        (status = 200, description = "Tier atualizado", body = Partner)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tier(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let partner = app_state
        .partner_service
        .update_tier(id, payload.tier)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(partner)))
}

// DELETE /api/partners/{id}
#[utoipa::path(
    delete,
    path = "/api/partners/{id}",
    tag = "Partners",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    responses(
        (status = 204, description = "Parceiro removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_partner(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .partner_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/partners/cnpj/{cnpj}
#[utoipa::path(
    get,
    path = "/api/partners/cnpj/{cnpj}",
    tag = "Partners",
    params(("cnpj" = String, Path, description = "CNPJ com ou sem máscara")),
    responses(
        (status = 200, description = "Dados cadastrais do CNPJ", body = CnpjRecord),
        (status = 400, description = "CNPJ inválido"),
        (status = 502, description = "Registro externo indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn fetch_cnpj(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Path(cnpj): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state
        .partner_service
        .fetch_cnpj(&cnpj)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(record)))
}
