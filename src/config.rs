// src/config.rs

use std::sync::Arc;

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        AnalyticsRepository, CaseRepository, CommissionRepository, ContractRepository,
        FavoriteRepository, LeadRepository, OfferRepository, PartnerRepository,
        ReferralRepository, ReviewRepository, UserRepository,
    },
    services::{
        AnalyticsService, AuthService, CaseService, CommissionService, ContractService,
        LeadService, OfferService, PartnerService, ReferralService, ReviewService,
        cnpj::BrasilApiCnpjProvider,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,

    pub auth_service: AuthService,
    pub partner_service: PartnerService,
    pub offer_service: OfferService,
    pub referral_service: ReferralService,
    pub commission_service: CommissionService,
    pub review_service: ReviewService,
    pub contract_service: ContractService,
    pub case_service: CaseService,
    pub lead_service: LeadService,
    pub analytics_service: AnalyticsService,
    pub favorite_repo: FavoriteRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let cnpj_api_base_url = env::var("CNPJ_API_BASE_URL")
            .unwrap_or_else(|_| "https://brasilapi.com.br".to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let partner_repo = PartnerRepository::new(db_pool.clone());
        let offer_repo = OfferRepository::new(db_pool.clone());
        let referral_repo = ReferralRepository::new(db_pool.clone());
        let commission_repo = CommissionRepository::new(db_pool.clone());
        let review_repo = ReviewRepository::new(db_pool.clone());
        let contract_repo = ContractRepository::new(db_pool.clone());
        let case_repo = CaseRepository::new(db_pool.clone());
        let lead_repo = LeadRepository::new(db_pool.clone());
        let analytics_repo = AnalyticsRepository::new(db_pool.clone());
        let favorite_repo = FavoriteRepository::new(db_pool.clone());

        let cnpj_provider = Arc::new(BrasilApiCnpjProvider::new(cnpj_api_base_url));

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let partner_service = PartnerService::new(
            partner_repo.clone(),
            user_repo,
            cnpj_provider,
            db_pool.clone(),
        );
        let offer_service = OfferService::new(offer_repo.clone(), db_pool.clone());
        let referral_service =
            ReferralService::new(referral_repo, offer_repo.clone(), db_pool.clone());
        let commission_service = CommissionService::new(commission_repo);
        let contract_service =
            ContractService::new(contract_repo, offer_repo.clone(), db_pool.clone());
        let review_service = ReviewService::new(
            review_repo,
            offer_repo.clone(),
            contract_service.clone(),
            db_pool.clone(),
        );
        let case_service = CaseService::new(case_repo, partner_repo, db_pool.clone());
        let lead_service = LeadService::new(
            lead_repo,
            offer_repo,
            analytics_repo.clone(),
            db_pool.clone(),
        );
        let analytics_service = AnalyticsService::new(analytics_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            i18n_store: I18nStore::new(),
            auth_service,
            partner_service,
            offer_service,
            referral_service,
            commission_service,
            review_service,
            contract_service,
            case_service,
            lead_service,
            analytics_service,
            favorite_repo,
        })
    }
}
