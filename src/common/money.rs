// src/common/money.rs

use crate::middleware::i18n::Locale;

// Todo valor monetário da API trafega como BIGINT em centavos.
// A formatação só acontece na borda de exportação (CSV), já localizada.

/// Formata centavos como moeda legível: "R$ 1.234,56" (pt) / "R$ 1,234.56" (en).
pub fn format_currency(cents: i64, locale: &Locale) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let reais = abs / 100;
    let centavos = abs % 100;

    let (thousands_sep, decimal_sep) = if locale.0 == "en" { (',', '.') } else { ('.', ',') };

    let grouped = group_thousands(reais, thousands_sep);
    let sign = if negative { "-" } else { "" };

    format!("{}R$ {}{}{:02}", sign, grouped, decimal_sep, centavos)
}

// Agrupa de 3 em 3 a partir da direita: 1234567 -> "1.234.567"
fn group_thousands(mut value: u64, sep: char) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups: Vec<String> = Vec::new();
    while value > 0 {
        let group = value % 1000;
        value /= 1000;
        if value > 0 {
            groups.push(format!("{:03}", group));
        } else {
            groups.push(group.to_string());
        }
    }
    groups.reverse();
    groups.join(&sep.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    fn en() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn formata_centavos_em_reais() {
        assert_eq!(format_currency(0, &pt()), "R$ 0,00");
        assert_eq!(format_currency(9, &pt()), "R$ 0,09");
        assert_eq!(format_currency(150, &pt()), "R$ 1,50");
        assert_eq!(format_currency(10000, &pt()), "R$ 100,00");
    }

    #[test]
    fn agrupa_milhares_no_padrao_brasileiro() {
        assert_eq!(format_currency(123_456, &pt()), "R$ 1.234,56");
        assert_eq!(format_currency(123_456_789, &pt()), "R$ 1.234.567,89");
        assert_eq!(format_currency(100_000_000, &pt()), "R$ 1.000.000,00");
    }

    #[test]
    fn locale_en_troca_separadores() {
        assert_eq!(format_currency(123_456_789, &en()), "R$ 1,234,567.89");
        assert_eq!(format_currency(150, &en()), "R$ 1.50");
    }

    #[test]
    fn valores_negativos_levam_sinal_na_frente() {
        assert_eq!(format_currency(-123_456, &pt()), "-R$ 1.234,56");
    }
}
