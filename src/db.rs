pub mod analytics_repo;
pub mod case_repo;
pub mod commission_repo;
pub mod contract_repo;
pub mod favorite_repo;
pub mod lead_repo;
pub mod offer_repo;
pub mod partner_repo;
pub mod referral_repo;
pub mod review_repo;
pub mod user_repo;

pub use analytics_repo::AnalyticsRepository;
pub use case_repo::CaseRepository;
pub use commission_repo::CommissionRepository;
pub use contract_repo::ContractRepository;
pub use favorite_repo::FavoriteRepository;
pub use lead_repo::LeadRepository;
pub use offer_repo::OfferRepository;
pub use partner_repo::PartnerRepository;
pub use referral_repo::ReferralRepository;
pub use review_repo::ReviewRepository;
pub use user_repo::UserRepository;
