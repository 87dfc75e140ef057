//src/main.rs

use std::time::Duration;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

// Intervalo entre as passadas do sweep de indicações vencidas
const OVERDUE_SWEEP_INTERVAL_SECS: u64 = 600;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Sweep de OVERDUE: o servidor é a única origem desse status.
    // Roda na subida e depois em intervalos fixos.
    let sweep_state = app_state.clone();
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(OVERDUE_SWEEP_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            if let Err(e) = sweep_state.referral_service.sweep_overdue().await {
                tracing::error!("Falha no sweep de indicações vencidas: {}", e);
            }
        }
    });

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do usuário logado
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Catálogo e perfis: a vitrine pública do marketplace.
    // POST/PUT de ofertas moram aqui também (mesmo path do GET público);
    // a proteção é o extractor RequireRole direto no handler.
    let catalog_routes = Router::new()
        .route(
            "/offers",
            get(handlers::offer::list_offers).post(handlers::offer::create_offer),
        )
        .route("/offers/all", get(handlers::offer::list_all_offers))
        .route(
            "/offers/{id}",
            get(handlers::offer::get_offer).put(handlers::offer::update_offer),
        )
        .route("/offers/{id}/split", get(handlers::offer::preview_split))
        .route(
            "/partners/{id}/profile",
            get(handlers::partner::get_public_profile)
                .put(handlers::partner::update_profile),
        )
        .route(
            "/reviews/partner/{id}",
            get(handlers::review::list_partner_reviews),
        )
        .route(
            "/cases/partner/{id}",
            get(handlers::partner_case::list_partner_cases),
        )
        .route("/leads/request", post(handlers::lead::submit_lead_request))
        .route("/analytics/events", post(handlers::analytics::track_event));

    // Gestão de parceiros (staff/admin + o próprio parceiro no perfil)
    let partner_routes = Router::new()
        .route(
            "/",
            post(handlers::partner::create_partner).get(handlers::partner::list_partners),
        )
        .route("/cnpj/{cnpj}", get(handlers::partner::fetch_cnpj))
        .route(
            "/{id}",
            get(handlers::partner::get_partner).delete(handlers::partner::delete_partner),
        )
        .route("/{id}/curation", patch(handlers::partner::update_curation))
        .route("/{id}/tier", patch(handlers::partner::update_tier))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Ciclo de vida das indicações
    let referral_routes = Router::new()
        .route(
            "/",
            post(handlers::referral::create_referral).get(handlers::referral::list_referrals),
        )
        .route(
            "/{id}/status",
            patch(handlers::referral::update_referral_status),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Relatórios financeiros
    let commission_routes = Router::new()
        .route("/summary", get(handlers::commission::get_summary))
        .route("/by-category", get(handlers::commission::get_by_category))
        .route("/aging", get(handlers::commission::get_aging))
        .route(
            "/monthly-evolution",
            get(handlers::commission::get_monthly_evolution),
        )
        .route("/by-partner", get(handlers::commission::get_by_partner))
        .route("/export", get(handlers::commission::export_csv))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Avaliações (a parte autenticada)
    let review_routes = Router::new()
        .route(
            "/",
            post(handlers::review::create_review).get(handlers::review::list_all_reviews),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Declarações de contrato e elegibilidade de avaliação
    let contract_routes = Router::new()
        .route("/", post(handlers::contract::declare_contract))
        .route("/eligibility", get(handlers::contract::check_eligibility))
        .route("/pending", get(handlers::contract::list_pending))
        .route("/{id}/approve", post(handlers::contract::approve_contract))
        .route("/{id}/reject", post(handlers::contract::reject_contract))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Cases de sucesso (gestão)
    let case_routes = Router::new()
        .route(
            "/",
            get(handlers::partner_case::list_all_cases).post(handlers::partner_case::create_case),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::partner_case::update_case)
                .delete(handlers::partner_case::delete_case),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Favoritos do comprador
    let favorite_routes = Router::new()
        .route("/", get(handlers::favorite::list_favorites))
        .route(
            "/{offer_id}",
            post(handlers::favorite::add_favorite).delete(handlers::favorite::remove_favorite),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Leads registrados pelo time + métricas
    let lead_routes = Router::new()
        .route(
            "/",
            post(handlers::lead::create_lead).get(handlers::lead::list_leads),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let analytics_routes = Router::new()
        .route(
            "/partners/{id}/metrics",
            get(handlers::analytics::get_partner_metrics),
        )
        .route("/export", get(handlers::analytics::export_report))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api", catalog_routes)
        .nest("/api/partners", partner_routes)
        .nest("/api/referrals", referral_routes)
        .nest("/api/commissions", commission_routes)
        .nest("/api/reviews", review_routes)
        .nest("/api/contracts", contract_routes)
        .nest("/api/cases", case_routes)
        .nest("/api/favorites", favorite_routes)
        .nest("/api/leads", lead_routes)
        .nest("/api/analytics", analytics_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
