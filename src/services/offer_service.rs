// src/services/offer_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OfferRepository, offer_repo::OfferRecord},
    models::{
        commission::{CheckoutSplit, split_checkout_value},
        offer::{Offer, OfferDetail, validate_checkout_split},
    },
};

// Entrada de variante/faq já tipada (o JSON solto ficou no passado)
pub type VariantInput = (String, Option<i32>, Option<i64>, Option<i64>, Option<i64>);
pub type FaqInput = (String, String);

#[derive(Clone)]
pub struct OfferService {
    repo: OfferRepository,
    pool: PgPool,
}

impl OfferService {
    pub fn new(repo: OfferRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Cria oferta + sub-entidades numa transação só.
    pub async fn create(
        &self,
        record: &OfferRecord<'_>,
        variants: &[VariantInput],
        faq: &[FaqInput],
    ) -> Result<Offer, AppError> {
        // Invariante do split validada no save, não no cálculo
        validate_checkout_split(
            record.sale_mode,
            record.zopu_take_rate_percent,
            record.partner_share_percent,
        )?;

        let mut tx = self.pool.begin().await?;

        let offer = self.repo.create(&mut *tx, record).await?;
        self.repo.replace_variants(&mut tx, offer.id, variants).await?;
        self.repo.replace_faq(&mut tx, offer.id, faq).await?;

        tx.commit().await?;

        Ok(offer)
    }

    /// Atualização com version: oferta, variantes e FAQ num tx só.
    pub async fn update(
        &self,
        id: Uuid,
        expected_version: i32,
        record: &OfferRecord<'_>,
        variants: &[VariantInput],
        faq: &[FaqInput],
    ) -> Result<Offer, AppError> {
        validate_checkout_split(
            record.sale_mode,
            record.zopu_take_rate_percent,
            record.partner_share_percent,
        )?;

        let mut tx = self.pool.begin().await?;

        let offer = match self.repo.update(&mut *tx, id, expected_version, record).await? {
            Some(offer) => offer,
            None => {
                // UPDATE vazio: decide entre "não existe" e "version velha"
                if self.repo.exists(id).await? {
                    return Err(AppError::VersionConflict);
                }
                return Err(AppError::OfferNotFound);
            }
        };

        self.repo.replace_variants(&mut tx, offer.id, variants).await?;
        self.repo.replace_faq(&mut tx, offer.id, faq).await?;

        tx.commit().await?;

        Ok(offer)
    }

    pub async fn list_public(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Offer>, AppError> {
        self.repo.list_public(category, search).await
    }

    pub async fn list_all(&self) -> Result<Vec<Offer>, AppError> {
        self.repo.list_all().await
    }

    /// Prévia do split plataforma/parceiro para um valor de checkout.
    /// O painel do parceiro mostra quanto fica de cada lado antes da venda.
    pub async fn preview_checkout_split(
        &self,
        id: Uuid,
        value_cents: i64,
    ) -> Result<CheckoutSplit, AppError> {
        let offer = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::OfferNotFound)?;

        Ok(split_checkout_value(
            value_cents,
            offer.zopu_take_rate_percent,
            offer.partner_share_percent,
        ))
    }

    /// Página de detalhe pública: oferta ativa de parceiro aprovado,
    /// com variantes, FAQ e o nome do parceiro.
    pub async fn get_public_detail(&self, id: Uuid) -> Result<OfferDetail, AppError> {
        let offer = self
            .repo
            .find_public_by_id(id)
            .await?
            .ok_or(AppError::OfferNotFound)?;

        let partner_name = self
            .repo
            .partner_name(offer.partner_id)
            .await?
            .ok_or(AppError::PartnerNotFound)?;

        let variants = self.repo.list_variants(offer.id).await?;
        let faq = self.repo.list_faq(offer.id).await?;

        Ok(OfferDetail {
            offer,
            partner_name,
            variants,
            faq,
        })
    }
}
