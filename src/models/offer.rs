// src/models/offer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "offer_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferType {
    Digital,
    ServiceStandard,
    ServiceComplex,
    License,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_mode", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleMode {
    Checkout,
    LeadForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "billing_period", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingPeriod {
    Monthly,
    Quarterly,
    Annual,
}

// --- STRUCTS ---

// Preços em centavos (BIGINT). Nenhum campo monetário decimal aqui.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: Uuid,
    pub partner_id: Uuid,

    #[schema(example = "ERP Cloud para Indústria")]
    pub title: String,
    #[schema(example = "erp-cloud-industria")]
    pub slug: String,
    pub description: String,

    // Rótulo de categoria usado pelo catálogo e pelos relatórios
    #[schema(example = "ERP")]
    pub category: String,

    pub offer_type: OfferType,
    pub sale_mode: SaleMode,

    #[schema(example = 990_00i64)]
    pub price: Option<i64>,
    pub price_monthly: Option<i64>,
    pub price_quarterly: Option<i64>,
    pub price_annual: Option<i64>,
    pub billing_periods: Vec<BillingPeriod>,

    // Percentuais inteiros 0..100
    #[schema(example = 15)]
    pub success_fee_percent: i16,
    pub zopu_take_rate_percent: Option<i16>,
    pub partner_share_percent: Option<i16>,

    pub deliverables: Vec<String>,
    pub is_active: bool,

    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Variante de plano da oferta (antes um JSON em coluna de texto;
// agora linha própria com schema)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferVariant {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub position: i32,
    #[schema(example = "Plano Pro")]
    pub name: String,
    #[schema(example = 50)]
    pub user_limit: Option<i32>,
    pub price_monthly: Option<i64>,
    pub price_quarterly: Option<i64>,
    pub price_annual: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferFaqEntry {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub position: i32,
    pub question: String,
    pub answer: String,
}

// Oferta completa como a página de detalhe consome
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetail {
    #[serde(flatten)]
    pub offer: Offer,
    pub partner_name: String,
    pub variants: Vec<OfferVariant>,
    pub faq: Vec<OfferFaqEntry>,
}

/// Valida a configuração de split de checkout no momento do save.
/// Com os dois lados presentes, a soma tem que fechar 100; com um só,
/// o outro é implícito (100 - valor) e não há o que conferir.
pub fn validate_checkout_split(
    sale_mode: SaleMode,
    zopu_take_rate: Option<i16>,
    partner_share: Option<i16>,
) -> Result<(), AppError> {
    if sale_mode != SaleMode::Checkout {
        return Ok(());
    }
    for percent in [zopu_take_rate, partner_share].into_iter().flatten() {
        if !(0..=100).contains(&percent) {
            return Err(AppError::FeeSplitInvalid);
        }
    }
    if let (Some(take), Some(share)) = (zopu_take_rate, partner_share)
        && take + share != 100
    {
        return Err(AppError::FeeSplitInvalid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_completo_precisa_somar_100() {
        assert!(validate_checkout_split(SaleMode::Checkout, Some(20), Some(80)).is_ok());
        assert!(validate_checkout_split(SaleMode::Checkout, Some(30), Some(80)).is_err());
        assert!(validate_checkout_split(SaleMode::Checkout, Some(0), Some(100)).is_ok());
    }

    #[test]
    fn split_parcial_e_aceito() {
        // O lado ausente é implicitamente 100 - presente
        assert!(validate_checkout_split(SaleMode::Checkout, Some(20), None).is_ok());
        assert!(validate_checkout_split(SaleMode::Checkout, None, Some(70)).is_ok());
        assert!(validate_checkout_split(SaleMode::Checkout, None, None).is_ok());
    }

    #[test]
    fn percentual_fora_da_faixa_falha() {
        assert!(validate_checkout_split(SaleMode::Checkout, Some(101), None).is_err());
        assert!(validate_checkout_split(SaleMode::Checkout, Some(-1), None).is_err());
    }

    #[test]
    fn lead_form_ignora_split() {
        // Oferta por formulário não passa por checkout, configuração é livre
        assert!(validate_checkout_split(SaleMode::LeadForm, Some(30), Some(80)).is_ok());
    }
}
