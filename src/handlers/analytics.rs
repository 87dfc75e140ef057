// src/handlers/analytics.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, StaffOnly},
    },
    models::{
        analytics::{AnalyticsEvent, AnalyticsEventType, PartnerMetrics},
        auth::AuthContext,
    },
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackEventPayload {
    pub event_type: AnalyticsEventType,
    pub partner_id: Option<Uuid>,
    pub offer_id: Option<Uuid>,

    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsQuery {
    pub since: Option<DateTime<Utc>>,
}

// POST /api/analytics/events  (ingestão, público)
#[utoipa::path(
    post,
    path = "/api/analytics/events",
    tag = "Analytics",
    request_body = TrackEventPayload,
    responses(
        (status = 201, description = "Evento registrado", body = AnalyticsEvent)
    )
)]
pub async fn track_event(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<TrackEventPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .analytics_service
        .track(
            payload.event_type,
            payload.partner_id,
            payload.offer_id,
            payload.metadata,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(event)))
}

// GET /api/analytics/partners/{id}/metrics
#[utoipa::path(
    get,
    path = "/api/analytics/partners/{id}/metrics",
    tag = "Analytics",
    params(
        ("id" = Uuid, Path, description = "ID do parceiro"),
        ("since" = Option<String>, Query, description = "Início da janela (RFC3339)")
    ),
    responses(
        (status = 200, description = "Métricas do painel do parceiro", body = PartnerMetrics),
        (status = 403, description = "Só o próprio parceiro ou o staff")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_partner_metrics(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(partner_id): Path<Uuid>,
    Query(query): Query<MetricsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = AuthContext::from_user(&user.0);

    let metrics = app_state
        .analytics_service
        .partner_metrics(&actor, partner_id, query.since)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(metrics)))
}

// GET /api/analytics/export
#[utoipa::path(
    get,
    path = "/api/analytics/export",
    tag = "Analytics",
    params(("since" = Option<String>, Query, description = "Início da janela (RFC3339)")),
    responses(
        (status = 200, description = "CSV de eventos", body = String, content_type = "text/csv")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_report(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<StaffOnly>,
    Query(query): Query<MetricsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = app_state
        .analytics_service
        .export_report(query.since)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        csv,
    ))
}
