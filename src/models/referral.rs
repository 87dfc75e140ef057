// src/models/referral.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

/// Prazo (em dias corridos) para o parceiro dar o aceite antes de a
/// indicação vencer.
pub const ACK_SLA_DAYS: i64 = 5;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "referral_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferralStatus {
    Sent,
    Acked,
    InNegotiation,
    Won,
    Lost,
    // Estado real, gravado pelo sweep do servidor quando o prazo de
    // aceite estoura. O cliente nunca calcula isso sozinho.
    Overdue,
}

impl ReferralStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReferralStatus::Won | ReferralStatus::Lost)
    }

    /// Em andamento = conta nos relatórios de aging e de pipeline.
    pub fn is_in_progress(&self) -> bool {
        !self.is_terminal()
    }

    /// Tabela de transições do ciclo de vida. OVERDUE só nasce do sweep
    /// (SENT -> OVERDUE); aceite atrasado volta para o fluxo normal.
    pub fn can_transition(self, to: ReferralStatus) -> bool {
        use ReferralStatus::*;
        matches!(
            (self, to),
            (Sent, Acked)
                | (Acked, InNegotiation)
                | (Acked, Won)
                | (Acked, Lost)
                | (InNegotiation, Won)
                | (InNegotiation, Lost)
                | (Overdue, Acked)
                | (Overdue, Lost)
        )
    }

    /// Valida uma transição pedida via API, devolvendo o erro de domínio.
    pub fn ensure_transition(self, to: ReferralStatus) -> Result<(), AppError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition { from: self, to })
        }
    }
}

// --- STRUCTS ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub partner_id: Uuid,

    pub buyer_name: String,
    pub buyer_company: String,
    pub buyer_email: String,
    pub buyer_phone: Option<String>,

    pub status: ReferralStatus,

    // Centavos
    #[schema(example = 10_000i64)]
    pub expected_value: i64,
    pub won_value: Option<i64>,

    // Comissões congeladas no momento do evento: a prevista usa o fee
    // vigente na criação, a realizada usa o fee vigente no ganho.
    pub success_fee_expected: i64,
    pub success_fee_realized: Option<i64>,

    pub ack_deadline: DateTime<Utc>,
    pub internal_notes: Option<String>,

    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub last_status_update: DateTime<Utc>,
}

// Indicação + contexto para listagens (nome do parceiro e da oferta)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferralListEntry {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub referral: Referral,
    pub partner_name: String,
    pub offer_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReferralStatus::*;

    #[test]
    fn fluxo_feliz_completo() {
        assert!(Sent.can_transition(Acked));
        assert!(Acked.can_transition(InNegotiation));
        assert!(InNegotiation.can_transition(Won));
        assert!(InNegotiation.can_transition(Lost));
    }

    #[test]
    fn aceite_pode_fechar_direto() {
        // Negociação rápida: parceiro aceita e já fecha
        assert!(Acked.can_transition(Won));
        assert!(Acked.can_transition(Lost));
    }

    #[test]
    fn sent_nao_pula_o_aceite() {
        assert!(!Sent.can_transition(InNegotiation));
        assert!(!Sent.can_transition(Won));
        assert!(!Sent.can_transition(Lost));
        assert!(!Sent.can_transition(Sent));
    }

    #[test]
    fn estados_terminais_nao_saem_do_lugar() {
        for terminal in [Won, Lost] {
            for target in [Sent, Acked, InNegotiation, Won, Lost, Overdue] {
                assert!(!terminal.can_transition(target));
            }
        }
    }

    #[test]
    fn nao_se_regride_para_sent() {
        // O exemplo clássico de transição proibida: WON -> SENT
        assert!(!Won.can_transition(Sent));
        assert!(!Acked.can_transition(Sent));
        assert!(!InNegotiation.can_transition(Acked));
    }

    #[test]
    fn overdue_aceita_ack_atrasado_ou_perda() {
        assert!(Overdue.can_transition(Acked));
        assert!(Overdue.can_transition(Lost));
        assert!(!Overdue.can_transition(Won));
        assert!(!Overdue.can_transition(InNegotiation));
    }

    #[test]
    fn overdue_nunca_e_pedido_via_api() {
        // SENT -> OVERDUE é exclusivo do sweep; a tabela da API não aceita
        assert!(!Sent.can_transition(Overdue));
        assert!(!Acked.can_transition(Overdue));
    }

    #[test]
    fn ensure_transition_carrega_os_estados_no_erro() {
        let err = Won.ensure_transition(Sent).unwrap_err();
        match err {
            AppError::InvalidTransition { from, to } => {
                assert_eq!(from, Won);
                assert_eq!(to, Sent);
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn em_andamento_exclui_terminais() {
        assert!(Sent.is_in_progress());
        assert!(Acked.is_in_progress());
        assert!(InNegotiation.is_in_progress());
        assert!(Overdue.is_in_progress());
        assert!(!Won.is_in_progress());
        assert!(!Lost.is_in_progress());
    }
}
