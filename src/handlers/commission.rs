// src/handlers/commission.rs

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        auth::AuthContext,
        reporting::{
            AgingReport, CategorySummary, CommissionSummary, MonthlyEvolutionPoint,
            PartnerCommissionReport,
        },
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionQuery {
    // Staff pode filtrar por parceiro; usuário de parceiro é
    // automaticamente limitado ao próprio
    pub partner_id: Option<Uuid>,
}

// GET /api/commissions/summary
#[utoipa::path(
    get,
    path = "/api/commissions/summary",
    tag = "Commissions",
    params(("partnerId" = Option<Uuid>, Query, description = "Filtro por parceiro (staff)")),
    responses(
        (status = 200, description = "Totais de comissão previsto x realizado", body = CommissionSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<CommissionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let summary = app_state
        .commission_service
        .get_summary(&actor, query.partner_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/commissions/by-category
#[utoipa::path(
    get,
    path = "/api/commissions/by-category",
    tag = "Commissions",
    params(("partnerId" = Option<Uuid>, Query, description = "Filtro por parceiro (staff)")),
    responses(
        (status = 200, description = "Indicações e conversão por categoria de oferta", body = Vec<CategorySummary>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_category(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<CommissionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let categories = app_state
        .commission_service
        .get_by_category(&actor, query.partner_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(categories)))
}

// GET /api/commissions/aging
#[utoipa::path(
    get,
    path = "/api/commissions/aging",
    tag = "Commissions",
    params(("partnerId" = Option<Uuid>, Query, description = "Filtro por parceiro (staff)")),
    responses(
        (status = 200, description = "Indicações em andamento por faixa de idade", body = AgingReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_aging(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<CommissionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let report = app_state
        .commission_service
        .get_aging_report(&actor, query.partner_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/commissions/monthly-evolution
#[utoipa::path(
    get,
    path = "/api/commissions/monthly-evolution",
    tag = "Commissions",
    params(("partnerId" = Option<Uuid>, Query, description = "Filtro por parceiro (staff)")),
    responses(
        (status = 200, description = "Série mensal previsto x realizado (12 meses)", body = Vec<MonthlyEvolutionPoint>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_monthly_evolution(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<CommissionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let points = app_state
        .commission_service
        .get_monthly_evolution(&actor, query.partner_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(points)))
}

// GET /api/commissions/by-partner
#[utoipa::path(
    get,
    path = "/api/commissions/by-partner",
    tag = "Commissions",
    params(("partnerId" = Option<Uuid>, Query, description = "Um parceiro específico ou todos")),
    responses(
        (status = 200, description = "Totais previsto x realizado por parceiro", body = Vec<PartnerCommissionReport>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_partner(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<CommissionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let reports = app_state
        .commission_service
        .get_by_partner(&actor, query.partner_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(reports)))
}

// GET /api/commissions/export
#[utoipa::path(
    get,
    path = "/api/commissions/export",
    tag = "Commissions",
    params(("partnerId" = Option<Uuid>, Query, description = "Um parceiro específico ou todos")),
    responses(
        (status = 200, description = "CSV do relatório, moeda formatada no locale do cliente", body = String, content_type = "text/csv")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_csv(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<CommissionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let csv = app_state
        .commission_service
        .export_csv(&actor, query.partner_id, &locale)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"comissoes.csv\"",
            ),
        ],
        csv,
    ))
}
