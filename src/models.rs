pub mod analytics;
pub mod auth;
pub mod commission;
pub mod contract;
pub mod favorite;
pub mod lead;
pub mod offer;
pub mod partner;
pub mod partner_case;
pub mod referral;
pub mod reporting;
pub mod review;
