// src/services/referral_service.rs

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OfferRepository, ReferralRepository},
    models::{
        auth::AuthContext,
        commission::compute_commission,
        referral::{ACK_SLA_DAYS, Referral, ReferralListEntry, ReferralStatus},
    },
};

#[derive(Clone)]
pub struct ReferralService {
    repo: ReferralRepository,
    offer_repo: OfferRepository,
    pool: PgPool,
}

impl ReferralService {
    pub fn new(repo: ReferralRepository, offer_repo: OfferRepository, pool: PgPool) -> Self {
        Self {
            repo,
            offer_repo,
            pool,
        }
    }

    /// Cria a indicação em nome de um lead. Exclusivo do staff (admin ou
    /// gerente); o parceiro dono vem da oferta, e a comissão prevista é
    /// congelada aqui com o fee vigente.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        actor: &AuthContext,
        offer_id: Uuid,
        buyer_name: &str,
        buyer_company: &str,
        buyer_email: &str,
        buyer_phone: Option<&str>,
        expected_value: i64,
        internal_notes: Option<&str>,
    ) -> Result<Referral, AppError> {
        if !actor.is_staff() {
            return Err(AppError::Forbidden);
        }

        let offer = self
            .offer_repo
            .find_by_id(offer_id)
            .await?
            .ok_or(AppError::OfferNotFound)?;

        // Snapshot da comissão prevista no instante da criação
        let success_fee_expected = compute_commission(expected_value, offer.success_fee_percent);
        let ack_deadline = Utc::now() + Duration::days(ACK_SLA_DAYS);

        let referral = self
            .repo
            .create(
                &self.pool,
                offer.id,
                offer.partner_id,
                buyer_name,
                buyer_company,
                buyer_email,
                buyer_phone,
                expected_value,
                success_fee_expected,
                ack_deadline,
                internal_notes,
            )
            .await?;

        tracing::info!(
            "📨 Indicação {} criada para o parceiro {} (previsto: {} centavos)",
            referral.id,
            referral.partner_id,
            success_fee_expected
        );

        Ok(referral)
    }

    /// Listagem com o recorte do ator: staff enxerga tudo (podendo filtrar
    /// por parceiro), usuário de parceiro só o que é dele.
    pub async fn list(
        &self,
        actor: &AuthContext,
        partner_filter: Option<Uuid>,
        status: Option<ReferralStatus>,
    ) -> Result<Vec<ReferralListEntry>, AppError> {
        let scope = if actor.is_staff() {
            partner_filter
        } else {
            match actor.partner_id {
                Some(own) => Some(own),
                None => return Err(AppError::Forbidden),
            }
        };

        self.repo.list(scope, status).await
    }

    /// Transição de status pedida pela API. Valida a máquina de estados,
    /// exige won_value no ganho e grava com checagem otimista de version.
    pub async fn update_status(
        &self,
        actor: &AuthContext,
        referral_id: Uuid,
        expected_version: i32,
        new_status: ReferralStatus,
        won_value: Option<i64>,
        internal_notes: Option<&str>,
    ) -> Result<Referral, AppError> {
        let referral = self
            .repo
            .find_by_id(referral_id)
            .await?
            .ok_or(AppError::ReferralNotFound)?;

        // Dono ou staff; mais ninguém mexe na indicação
        if !actor.is_staff() && !actor.owns_partner(referral.partner_id) {
            return Err(AppError::Forbidden);
        }

        referral.status.ensure_transition(new_status)?;

        let (won_value, success_fee_realized) = if new_status == ReferralStatus::Won {
            let value = won_value.ok_or(AppError::WonValueRequired)?;
            if value < 0 {
                return Err(AppError::WonValueRequired);
            }

            // A comissão realizada usa o fee COMO CONFIGURADO AGORA, não o
            // snapshot da criação. Se o admin mexeu no fee no meio do caminho,
            // previsto e realizado divergem mesmo.
            let offer = self
                .offer_repo
                .find_by_id(referral.offer_id)
                .await?
                .ok_or(AppError::OfferNotFound)?;

            (
                Some(value),
                Some(compute_commission(value, offer.success_fee_percent)),
            )
        } else {
            (None, None)
        };

        let updated = match self
            .repo
            .update_status(
                &self.pool,
                referral_id,
                expected_version,
                new_status,
                won_value,
                success_fee_realized,
                internal_notes,
            )
            .await?
        {
            Some(referral) => referral,
            // A indicação existia logo acima; UPDATE vazio aqui é corrida
            None => return Err(AppError::VersionConflict),
        };

        tracing::info!(
            "🔁 Indicação {}: {:?} -> {:?}",
            updated.id,
            referral.status,
            updated.status
        );

        Ok(updated)
    }

    /// Passada periódica do servidor: vence indicações SENT com prazo
    /// de aceite estourado. É a única origem do status OVERDUE.
    pub async fn sweep_overdue(&self) -> Result<u64, AppError> {
        let swept = self.repo.sweep_overdue().await?;
        if swept > 0 {
            tracing::info!("⏰ Sweep: {} indicação(ões) marcadas como OVERDUE", swept);
        }
        Ok(swept)
    }
}
