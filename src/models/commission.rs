// src/models/commission.rs

use serde::Serialize;
use utoipa::ToSchema;

// Matemática de comissão. Tudo inteiro, em centavos, truncando em
// direção a zero. Percentuais já chegam validados como inteiros 0..100.

/// Comissão (success fee) sobre um valor: floor(valor * percentual / 100).
pub fn compute_commission(value_cents: i64, fee_percent: i16) -> i64 {
    value_cents * i64::from(fee_percent) / 100
}

// Divisão plataforma/parceiro de uma venda via checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSplit {
    pub zopu_share: i64,
    pub partner_share: i64,
}

/// Resolve os percentuais efetivos: quando só um lado está configurado,
/// o outro é 100 - ele. Sem nenhum configurado, tudo fica com o parceiro.
pub fn effective_split_percents(
    zopu_take_rate: Option<i16>,
    partner_share: Option<i16>,
) -> (i16, i16) {
    match (zopu_take_rate, partner_share) {
        (Some(take), Some(share)) => (take, share),
        (Some(take), None) => (take, 100 - take),
        (None, Some(share)) => (100 - share, share),
        (None, None) => (0, 100),
    }
}

/// Calcula o split de um valor de checkout. O lado da plataforma trunca;
/// o resto inteiro vai para o parceiro, então as partes sempre somam o valor.
pub fn split_checkout_value(
    value_cents: i64,
    zopu_take_rate: Option<i16>,
    partner_share: Option<i16>,
) -> CheckoutSplit {
    let (take, _share) = effective_split_percents(zopu_take_rate, partner_share);
    let zopu_share = compute_commission(value_cents, take);
    CheckoutSplit {
        zopu_share,
        partner_share: value_cents - zopu_share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comissao_trunca_em_direcao_a_zero() {
        // R$100,00 a 15% -> R$15,00
        assert_eq!(compute_commission(10_000, 15), 1_500);
        // R$80,00 a 15% -> R$12,00
        assert_eq!(compute_commission(8_000, 15), 1_200);
        // 999 centavos a 15% = 149,85 -> trunca para 149
        assert_eq!(compute_commission(999, 15), 149);
        assert_eq!(compute_commission(0, 50), 0);
        assert_eq!(compute_commission(10_000, 0), 0);
        assert_eq!(compute_commission(10_000, 100), 10_000);
    }

    #[test]
    fn prevista_e_realizada_divergem_quando_fee_muda() {
        // Cenário do fluxo real: indicação criada com fee 15%,
        // fee editado para 20% antes do ganho.
        let expected = compute_commission(10_000, 15);
        let realized = compute_commission(8_000, 20);
        assert_eq!(expected, 1_500);
        assert_eq!(realized, 1_600);
    }

    #[test]
    fn percentuais_implicitos_fecham_100() {
        assert_eq!(effective_split_percents(Some(20), Some(80)), (20, 80));
        assert_eq!(effective_split_percents(Some(30), None), (30, 70));
        assert_eq!(effective_split_percents(None, Some(75)), (25, 75));
        assert_eq!(effective_split_percents(None, None), (0, 100));
    }

    #[test]
    fn split_sempre_soma_o_valor_cheio() {
        // 101 centavos a 50/50 não divide exato; o resto fica com o parceiro
        let split = split_checkout_value(101, Some(50), Some(50));
        assert_eq!(split.zopu_share, 50);
        assert_eq!(split.partner_share, 51);
        assert_eq!(split.zopu_share + split.partner_share, 101);

        let split = split_checkout_value(10_000, Some(20), Some(80));
        assert_eq!(split.zopu_share, 2_000);
        assert_eq!(split.partner_share, 8_000);
    }
}
