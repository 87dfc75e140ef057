// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;
use crate::models::referral::ReferralStatus;

// Erro de domínio. Cada variante carrega um código estável que o
// frontend usa como chave; a mensagem traduzida sai do I18nStore.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("CNPJ já cadastrado")]
    CnpjAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Parceiro não encontrado")]
    PartnerNotFound,

    #[error("Oferta não encontrada")]
    OfferNotFound,

    #[error("Indicação não encontrada")]
    ReferralNotFound,

    #[error("Declaração de contrato não encontrada")]
    ContractNotFound,

    #[error("Case não encontrado")]
    CaseNotFound,

    // Máquina de estados da indicação
    #[error("Transição inválida: {from:?} -> {to:?}")]
    InvalidTransition {
        from: ReferralStatus,
        to: ReferralStatus,
    },

    #[error("wonValue é obrigatório ao marcar como ganho")]
    WonValueRequired,

    // Escrita otimista rejeitada (coluna version não bateu)
    #[error("Registro foi alterado por outro usuário")]
    VersionConflict,

    #[error("Take rate e share do parceiro devem somar 100")]
    FeeSplitInvalid,

    #[error("CNPJ inválido")]
    InvalidCnpj,

    #[error("Falha na consulta de CNPJ: {0}")]
    CnpjLookupFailed(String),

    #[error("Avaliação não permitida sem contrato aprovado")]
    ReviewNotAllowed,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Código estável exposto na resposta (e chave de tradução).
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::CnpjAlreadyExists => "cnpj_already_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::Forbidden => "forbidden",
            AppError::UserNotFound => "user_not_found",
            AppError::PartnerNotFound => "partner_not_found",
            AppError::OfferNotFound => "offer_not_found",
            AppError::ReferralNotFound => "referral_not_found",
            AppError::ContractNotFound => "contract_not_found",
            AppError::CaseNotFound => "case_not_found",
            AppError::InvalidTransition { .. } => "invalid_transition",
            AppError::WonValueRequired => "won_value_required",
            AppError::VersionConflict => "version_conflict",
            AppError::FeeSplitInvalid => "fee_split_invalid",
            AppError::InvalidCnpj => "invalid_cnpj",
            AppError::CnpjLookupFailed(_) => "cnpj_lookup_failed",
            AppError::ReviewNotAllowed => "review_not_allowed",
            AppError::UniqueConstraintViolation(_) => "unique_violation",
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::WonValueRequired
            | AppError::FeeSplitInvalid
            | AppError::InvalidCnpj => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::ReviewNotAllowed => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::PartnerNotFound
            | AppError::OfferNotFound
            | AppError::ReferralNotFound
            | AppError::ContractNotFound
            | AppError::CaseNotFound => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists
            | AppError::CnpjAlreadyExists
            | AppError::VersionConflict
            | AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::CnpjLookupFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte para o erro de borda, já com a mensagem no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        // Validação devolve os detalhes campo a campo
        let details = match self {
            AppError::ValidationError(errors) => {
                let mut map = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| Value::String(m.to_string())))
                        .collect();
                    map.insert(field.to_string(), Value::Array(messages));
                }
                Some(Value::Object(map))
            }
            AppError::InvalidTransition { from, to } => Some(json!({
                "from": from,
                "to": to,
            })),
            _ => None,
        };

        // Erros inesperados são logados com o detalhe completo; o cliente
        // recebe só a mensagem genérica.
        if self.status() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        ApiError {
            status: self.status(),
            code: self.code(),
            error: store.message(self.code(), locale),
            details,
        }
    }
}

// Erro pronto para virar resposta HTTP. É isso que os handlers devolvem.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "code": self.code,
            "error": self.error,
        });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        (self.status, Json(body)).into_response()
    }
}
