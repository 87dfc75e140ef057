// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Partners ---
        handlers::partner::create_partner,
        handlers::partner::list_partners,
        handlers::partner::get_partner,
        handlers::partner::get_public_profile,
        handlers::partner::update_profile,
        handlers::partner::update_curation,
        handlers::partner::update_tier,
        handlers::partner::delete_partner,
        handlers::partner::fetch_cnpj,

        // --- Offers ---
        handlers::offer::list_offers,
        handlers::offer::get_offer,
        handlers::offer::create_offer,
        handlers::offer::update_offer,
        handlers::offer::preview_split,
        handlers::offer::list_all_offers,

        // --- Referrals ---
        handlers::referral::create_referral,
        handlers::referral::list_referrals,
        handlers::referral::update_referral_status,

        // --- Commissions ---
        handlers::commission::get_summary,
        handlers::commission::get_by_category,
        handlers::commission::get_aging,
        handlers::commission::get_monthly_evolution,
        handlers::commission::get_by_partner,
        handlers::commission::export_csv,

        // --- Reviews ---
        handlers::review::create_review,
        handlers::review::list_all_reviews,
        handlers::review::list_partner_reviews,

        // --- Contracts ---
        handlers::contract::declare_contract,
        handlers::contract::check_eligibility,
        handlers::contract::list_pending,
        handlers::contract::approve_contract,
        handlers::contract::reject_contract,

        // --- Cases ---
        handlers::partner_case::list_partner_cases,
        handlers::partner_case::list_all_cases,
        handlers::partner_case::create_case,
        handlers::partner_case::update_case,
        handlers::partner_case::delete_case,

        // --- Favorites ---
        handlers::favorite::list_favorites,
        handlers::favorite::add_favorite,
        handlers::favorite::remove_favorite,

        // --- Leads ---
        handlers::lead::submit_lead_request,
        handlers::lead::list_leads,
        handlers::lead::create_lead,

        // --- Analytics ---
        handlers::analytics::track_event,
        handlers::analytics::get_partner_metrics,
        handlers::analytics::export_report,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Partners ---
            models::partner::CurationStatus,
            models::partner::PartnerTier,
            models::partner::Partner,
            models::partner::PartnerPublicProfile,
            models::partner::CnpjRecord,
            handlers::partner::CreatePartnerPayload,
            handlers::partner::UpdatePartnerProfilePayload,
            handlers::partner::UpdateCurationPayload,
            handlers::partner::UpdateTierPayload,

            // --- Offers ---
            models::offer::OfferType,
            models::offer::SaleMode,
            models::offer::BillingPeriod,
            models::offer::Offer,
            models::offer::OfferVariant,
            models::offer::OfferFaqEntry,
            models::offer::OfferDetail,
            handlers::offer::OfferPayload,
            handlers::offer::UpdateOfferPayload,
            handlers::offer::OfferVariantPayload,
            handlers::offer::OfferFaqPayload,

            // --- Referrals ---
            models::referral::ReferralStatus,
            models::referral::Referral,
            models::referral::ReferralListEntry,
            handlers::referral::CreateReferralPayload,
            handlers::referral::UpdateReferralStatusPayload,

            // --- Commissions / relatórios ---
            models::commission::CheckoutSplit,
            models::reporting::CommissionSummary,
            models::reporting::CategorySummary,
            models::reporting::AgingBucket,
            models::reporting::AgingReport,
            models::reporting::MonthlyEvolutionPoint,
            models::reporting::PartnerCommissionReport,

            // --- Reviews ---
            models::review::Review,
            models::review::ReviewSummary,
            handlers::review::CreateReviewPayload,

            // --- Contracts ---
            models::contract::ContractStatus,
            models::contract::ContractDeclaration,
            models::contract::ReviewEligibility,
            handlers::contract::DeclareContractPayload,

            // --- Cases ---
            models::partner_case::PartnerCase,
            handlers::partner_case::CasePayload,

            // --- Favorites ---
            models::favorite::FavoriteEntry,

            // --- Leads ---
            models::lead::LeadRequest,
            handlers::lead::SubmitLeadPayload,
            handlers::lead::CreateLeadPayload,

            // --- Analytics ---
            models::analytics::AnalyticsEventType,
            models::analytics::AnalyticsEvent,
            models::analytics::PartnerMetrics,
            handlers::analytics::TrackEventPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário Logado"),
        (name = "Partners", description = "Cadastro, Curadoria e Perfil de Parceiros"),
        (name = "Offers", description = "Catálogo de Ofertas e Configuração de Fees"),
        (name = "Referrals", description = "Ciclo de Vida das Indicações"),
        (name = "Commissions", description = "Relatórios Financeiros (Previsto x Realizado)"),
        (name = "Reviews", description = "Avaliações de Parceiros"),
        (name = "Contracts", description = "Declarações de Contrato e Elegibilidade"),
        (name = "Cases", description = "Cases de Sucesso"),
        (name = "Favorites", description = "Ofertas Favoritas do Comprador"),
        (name = "Leads", description = "Leads do Formulário Público"),
        (name = "Analytics", description = "Eventos e Métricas de Uso")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
