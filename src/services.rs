pub mod analytics_service;
pub mod auth;
pub mod case_service;
pub mod cnpj;
pub mod commission_service;
pub mod contract_service;
pub mod lead_service;
pub mod offer_service;
pub mod partner_service;
pub mod referral_service;
pub mod review_service;

pub use analytics_service::AnalyticsService;
pub use auth::AuthService;
pub use case_service::CaseService;
pub use commission_service::CommissionService;
pub use contract_service::ContractService;
pub use lead_service::LeadService;
pub use offer_service::OfferService;
pub use partner_service::PartnerService;
pub use referral_service::ReferralService;
pub use review_service::ReviewService;
