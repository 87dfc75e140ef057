// src/handlers/offer.rs

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
    db::offer_repo::OfferRecord,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, StaffOnly},
    },
    models::{
        commission::CheckoutSplit,
        offer::{BillingPeriod, Offer, OfferDetail, OfferType, SaleMode},
    },
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferVariantPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Plano Pro")]
    pub name: String,

    #[validate(range(min = 1, message = "invalid_user_limit"))]
    pub user_limit: Option<i32>,

    // Centavos
    pub price_monthly: Option<i64>,
    pub price_quarterly: Option<i64>,
    pub price_annual: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferFaqPayload {
    #[validate(length(min = 1, message = "required"))]
    pub question: String,

    #[validate(length(min = 1, message = "required"))]
    pub answer: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferPayload {
    pub partner_id: Uuid,

    #[validate(length(min = 3, message = "required"))]
    #[schema(example = "ERP Cloud para Indústria")]
    pub title: String,

    #[validate(length(min = 3, message = "required"))]
    #[schema(example = "erp-cloud-industria")]
    pub slug: String,

    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "ERP")]
    pub category: String,

    pub offer_type: OfferType,
    pub sale_mode: SaleMode,

    // Tudo em centavos
    pub price: Option<i64>,
    pub price_monthly: Option<i64>,
    pub price_quarterly: Option<i64>,
    pub price_annual: Option<i64>,

    #[serde(default)]
    pub billing_periods: Vec<BillingPeriod>,

    // Percentuais inteiros 0..100; o split de checkout é validado no service
    #[validate(range(min = 0, max = 100, message = "invalid_percent"))]
    #[schema(example = 15)]
    pub success_fee_percent: i16,

    #[validate(range(min = 0, max = 100, message = "invalid_percent"))]
    pub zopu_take_rate_percent: Option<i16>,

    #[validate(range(min = 0, max = 100, message = "invalid_percent"))]
    pub partner_share_percent: Option<i16>,

    #[serde(default)]
    pub deliverables: Vec<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[validate(nested)]
    #[serde(default)]
    pub variants: Vec<OfferVariantPayload>,

    #[validate(nested)]
    #[serde(default)]
    pub faq: Vec<OfferFaqPayload>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferPayload {
    // Escrita otimista
    pub version: i32,

    #[serde(flatten)]
    #[validate(nested)]
    pub offer: OfferPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOffersQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPreviewQuery {
    // Valor da venda em centavos
    pub value: i64,
}

impl OfferPayload {
    fn as_record(&self) -> OfferRecord<'_> {
        OfferRecord {
            partner_id: self.partner_id,
            title: &self.title,
            slug: &self.slug,
            description: &self.description,
            category: &self.category,
            offer_type: self.offer_type,
            sale_mode: self.sale_mode,
            price: self.price,
            price_monthly: self.price_monthly,
            price_quarterly: self.price_quarterly,
            price_annual: self.price_annual,
            billing_periods: &self.billing_periods,
            success_fee_percent: self.success_fee_percent,
            zopu_take_rate_percent: self.zopu_take_rate_percent,
            partner_share_percent: self.partner_share_percent,
            deliverables: &self.deliverables,
            is_active: self.is_active,
        }
    }

    fn variant_inputs(&self) -> Vec<(String, Option<i32>, Option<i64>, Option<i64>, Option<i64>)> {
        self.variants
            .iter()
            .map(|v| {
                (
                    v.name.clone(),
                    v.user_limit,
                    v.price_monthly,
                    v.price_quarterly,
                    v.price_annual,
                )
            })
            .collect()
    }

    fn faq_inputs(&self) -> Vec<(String, String)> {
        self.faq
            .iter()
            .map(|f| (f.question.clone(), f.answer.clone()))
            .collect()
    }
}

// =============================================================================
//  HANDLERS
// =============================================================================

// GET /api/offers  (catálogo público)
#[utoipa::path(
    get,
    path = "/api/offers",
    tag = "Offers",
    params(
        ("category" = Option<String>, Query, description = "Filtro por categoria"),
        ("search" = Option<String>, Query, description = "Busca por título/descrição")
    ),
    responses(
        (status = 200, description = "Ofertas ativas de parceiros aprovados", body = Vec<Offer>)
    )
)]
pub async fn list_offers(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListOffersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let offers = app_state
        .offer_service
        .list_public(query.category.as_deref(), query.search.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(offers)))
}

// GET /api/offers/{id}  (detalhe público)
#[utoipa::path(
    get,
    path = "/api/offers/{id}",
    tag = "Offers",
    params(("id" = Uuid, Path, description = "ID da oferta")),
    responses(
        (status = 200, description = "Detalhe completo da oferta", body = OfferDetail),
        (status = 404, description = "Não encontrada (ou fora do catálogo)")
    )
)]
pub async fn get_offer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .offer_service
        .get_public_detail(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(detail)))
}

// POST /api/offers
#[utoipa::path(
    post,
    path = "/api/offers",
    tag = "Offers",
    request_body = OfferPayload,
    responses(
        (status = 201, description = "Oferta criada", body = Offer),
        (status = 400, description = "Dados inválidos (inclui split de checkout que não soma 100)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_offer(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Json(payload): Json<OfferPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let offer = app_state
        .offer_service
        .create(
            &payload.as_record(),
            &payload.variant_inputs(),
            &payload.faq_inputs(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(offer)))
}

// PUT /api/offers/{id}
#[utoipa::path(
    put,
    path = "/api/offers/{id}",
    tag = "Offers",
    params(("id" = Uuid, Path, description = "ID da oferta")),
    request_body = UpdateOfferPayload,
    responses(
        (status = 200, description = "Oferta atualizada", body = Offer),
        (status = 409, description = "Version desatualizada (escrita concorrente)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_offer(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOfferPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let offer = app_state
        .offer_service
        .update(
            id,
            payload.version,
            &payload.offer.as_record(),
            &payload.offer.variant_inputs(),
            &payload.offer.faq_inputs(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(offer)))
}

// GET /api/offers/{id}/split
#[utoipa::path(
    get,
    path = "/api/offers/{id}/split",
    tag = "Offers",
    params(
        ("id" = Uuid, Path, description = "ID da oferta"),
        ("value" = i64, Query, description = "Valor da venda em centavos")
    ),
    responses(
        (status = 200, description = "Divisão plataforma/parceiro para o valor informado", body = CheckoutSplit),
        (status = 404, description = "Oferta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_split(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<SplitPreviewQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let split = app_state
        .offer_service
        .preview_checkout_split(id, query.value)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(split)))
}

// GET /api/offers/all  (visão do admin, inclui inativas)
#[utoipa::path(
    get,
    path = "/api/offers/all",
    tag = "Offers",
    responses(
        (status = 200, description = "Todas as ofertas, inclusive fora do catálogo", body = Vec<Offer>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_all_offers(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let offers = app_state
        .offer_service
        .list_all()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(offers)))
}
