// src/common/i18n.rs

use std::collections::HashMap;

use crate::middleware::i18n::Locale;

// Mensagens por código de erro. O padrão é pt (público brasileiro);
// en cobre o painel dos parceiros internacionais.
#[derive(Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, (&'static str, &'static str)>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages: HashMap<&'static str, (&'static str, &'static str)> = HashMap::new();

        // (pt, en)
        messages.insert(
            "validation_error",
            (
                "Um ou mais campos são inválidos.",
                "One or more fields are invalid.",
            ),
        );
        messages.insert(
            "email_already_exists",
            ("Este e-mail já está em uso.", "This e-mail is already taken."),
        );
        messages.insert(
            "cnpj_already_exists",
            ("Este CNPJ já está cadastrado.", "This CNPJ is already registered."),
        );
        messages.insert(
            "invalid_credentials",
            ("E-mail ou senha inválidos.", "Invalid e-mail or password."),
        );
        messages.insert(
            "invalid_token",
            (
                "Token de autenticação inválido ou ausente.",
                "Missing or invalid authentication token.",
            ),
        );
        messages.insert(
            "forbidden",
            (
                "Você não tem permissão para realizar esta ação.",
                "You are not allowed to perform this action.",
            ),
        );
        messages.insert("user_not_found", ("Usuário não encontrado.", "User not found."));
        messages.insert("partner_not_found", ("Parceiro não encontrado.", "Partner not found."));
        messages.insert("offer_not_found", ("Oferta não encontrada.", "Offer not found."));
        messages.insert("referral_not_found", ("Indicação não encontrada.", "Referral not found."));
        messages.insert(
            "contract_not_found",
            ("Declaração de contrato não encontrada.", "Contract declaration not found."),
        );
        messages.insert("case_not_found", ("Case não encontrado.", "Case not found."));
        messages.insert(
            "invalid_transition",
            (
                "Mudança de status não permitida para esta indicação.",
                "This status change is not allowed for this referral.",
            ),
        );
        messages.insert(
            "won_value_required",
            (
                "Informe o valor ganho para fechar a indicação.",
                "A won value is required to close the referral as won.",
            ),
        );
        messages.insert(
            "version_conflict",
            (
                "O registro foi alterado por outra pessoa. Recarregue e tente novamente.",
                "The record was changed by someone else. Reload and try again.",
            ),
        );
        messages.insert(
            "fee_split_invalid",
            (
                "Take rate e share do parceiro devem somar exatamente 100%.",
                "Take rate and partner share must add up to exactly 100%.",
            ),
        );
        messages.insert("invalid_cnpj", ("CNPJ inválido.", "Invalid CNPJ."));
        messages.insert(
            "cnpj_lookup_failed",
            (
                "Não foi possível consultar o CNPJ agora. Tente novamente.",
                "CNPJ lookup is unavailable right now. Try again later.",
            ),
        );
        messages.insert(
            "review_not_allowed",
            (
                "Você precisa de um contrato aprovado com este parceiro para avaliar.",
                "You need an approved contract with this partner to leave a review.",
            ),
        );
        messages.insert(
            "unique_violation",
            ("Registro duplicado.", "Duplicate record."),
        );
        messages.insert(
            "internal_error",
            ("Ocorreu um erro inesperado.", "An unexpected error occurred."),
        );

        Self { messages }
    }

    pub fn message(&self, code: &str, locale: &Locale) -> String {
        match self.messages.get(code) {
            Some((pt, en)) => {
                if locale.0 == "en" {
                    (*en).to_string()
                } else {
                    (*pt).to_string()
                }
            }
            // Código sem tradução: devolve o próprio código, nunca um panic
            None => code.to_string(),
        }
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
