// src/services/commission_service.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::{
    common::{error::AppError, money::format_currency},
    db::CommissionRepository,
    middleware::i18n::Locale,
    models::{
        auth::AuthContext,
        referral::ReferralStatus,
        reporting::{
            AgingBucket, AgingReport, CategorySummary, CommissionSummary, MonthlyEvolutionPoint,
            PartnerCommissionReport, ReferralReportRow,
        },
    },
};

/// Janela da série mensal previsto x realizado.
const EVOLUTION_MONTHS: u32 = 12;

// Limites (em dias) das faixas do relatório de aging
const AGING_BUCKETS: [(&str, i64, i64); 4] = [
    ("0-7d", 0, 7),
    ("8-14d", 8, 14),
    ("15-30d", 15, 30),
    ("30d+", 31, i64::MAX),
];

#[derive(Clone)]
pub struct CommissionService {
    repo: CommissionRepository,
}

impl CommissionService {
    pub fn new(repo: CommissionRepository) -> Self {
        Self { repo }
    }

    /// Recorte de visibilidade dos relatórios: staff enxerga tudo (com
    /// filtro opcional), parceiro só os próprios números.
    fn scope_for(
        actor: &AuthContext,
        partner_filter: Option<Uuid>,
    ) -> Result<Option<Uuid>, AppError> {
        if actor.is_staff() {
            return Ok(partner_filter);
        }
        match actor.partner_id {
            Some(own) => Ok(Some(own)),
            None => Err(AppError::Forbidden),
        }
    }

    pub async fn get_summary(
        &self,
        actor: &AuthContext,
        partner_filter: Option<Uuid>,
    ) -> Result<CommissionSummary, AppError> {
        let scope = Self::scope_for(actor, partner_filter)?;
        let rows = self.repo.fetch_report_rows(scope, None).await?;
        Ok(summarize(&rows))
    }

    pub async fn get_by_category(
        &self,
        actor: &AuthContext,
        partner_filter: Option<Uuid>,
    ) -> Result<Vec<CategorySummary>, AppError> {
        let scope = Self::scope_for(actor, partner_filter)?;
        let rows = self.repo.fetch_report_rows(scope, None).await?;
        Ok(group_by_category(&rows))
    }

    pub async fn get_aging_report(
        &self,
        actor: &AuthContext,
        partner_filter: Option<Uuid>,
    ) -> Result<AgingReport, AppError> {
        let scope = Self::scope_for(actor, partner_filter)?;
        let rows = self.repo.fetch_report_rows(scope, None).await?;
        Ok(build_aging_report(&rows, Utc::now()))
    }

    pub async fn get_monthly_evolution(
        &self,
        actor: &AuthContext,
        partner_filter: Option<Uuid>,
    ) -> Result<Vec<MonthlyEvolutionPoint>, AppError> {
        let scope = Self::scope_for(actor, partner_filter)?;
        let rows = self.repo.fetch_report_rows(scope, None).await?;
        Ok(build_monthly_evolution(&rows, Utc::now()))
    }

    pub async fn get_by_partner(
        &self,
        actor: &AuthContext,
        partner_filter: Option<Uuid>,
    ) -> Result<Vec<PartnerCommissionReport>, AppError> {
        let scope = Self::scope_for(actor, partner_filter)?;
        let rows = self.repo.fetch_report_rows(scope, None).await?;
        Ok(group_by_partner(&rows))
    }

    /// Exportação CSV do relatório por parceiro, com moeda já formatada
    /// no locale de quem pediu.
    pub async fn export_csv(
        &self,
        actor: &AuthContext,
        partner_filter: Option<Uuid>,
        locale: &Locale,
    ) -> Result<String, AppError> {
        let scope = Self::scope_for(actor, partner_filter)?;
        let rows = self.repo.fetch_report_rows(scope, None).await?;
        Ok(build_csv(&rows, locale))
    }
}

// =========================================================================
//  AGREGAÇÃO (pura, em memória; o repo só entrega as linhas)
// =========================================================================

fn summarize(rows: &[ReferralReportRow]) -> CommissionSummary {
    let mut summary = CommissionSummary {
        total_referrals: 0,
        total_previsto: 0,
        total_realizado: 0,
        leads_won: 0,
        leads_lost: 0,
        leads_in_progress: 0,
    };

    for row in rows {
        summary.total_referrals += 1;
        summary.total_previsto += row.success_fee_expected;
        summary.total_realizado += row.success_fee_realized.unwrap_or(0);
        match row.status {
            ReferralStatus::Won => summary.leads_won += 1,
            ReferralStatus::Lost => summary.leads_lost += 1,
            _ => summary.leads_in_progress += 1,
        }
    }

    summary
}

fn group_by_category(rows: &[ReferralReportRow]) -> Vec<CategorySummary> {
    // BTreeMap para saída estável em ordem alfabética
    let mut by_category: BTreeMap<&str, CategorySummary> = BTreeMap::new();

    for row in rows {
        let entry = by_category
            .entry(row.category.as_str())
            .or_insert_with(|| CategorySummary {
                category: row.category.clone(),
                total_leads: 0,
                leads_won: 0,
                leads_lost: 0,
                leads_in_progress: 0,
                total_value: 0,
                won_value: 0,
                conversion_rate: 0.0,
            });

        entry.total_leads += 1;
        entry.total_value += row.expected_value;
        match row.status {
            ReferralStatus::Won => {
                entry.leads_won += 1;
                entry.won_value += row.won_value.unwrap_or(0);
            }
            ReferralStatus::Lost => entry.leads_lost += 1,
            _ => entry.leads_in_progress += 1,
        }
    }

    by_category
        .into_values()
        .map(|mut summary| {
            // Nunca divide por zero: sem leads, conversão é exatamente 0
            summary.conversion_rate = if summary.total_leads > 0 {
                summary.leads_won as f64 / summary.total_leads as f64
            } else {
                0.0
            };
            summary
        })
        .collect()
}

fn build_aging_report(rows: &[ReferralReportRow], now: DateTime<Utc>) -> AgingReport {
    let mut counts = [0i64; AGING_BUCKETS.len()];
    let mut total = 0i64;

    for row in rows {
        if !row.status.is_in_progress() {
            continue;
        }
        total += 1;
        let age_days = (now - row.created_at).num_days().max(0);
        for (idx, (_, min, max)) in AGING_BUCKETS.iter().enumerate() {
            if age_days >= *min && age_days <= *max {
                counts[idx] += 1;
                break;
            }
        }
    }

    let buckets = AGING_BUCKETS
        .iter()
        .zip(counts)
        .map(|(&(label, _, _), count)| AgingBucket {
            label,
            count,
            percentage: if total > 0 {
                count as f64 * 100.0 / total as f64
            } else {
                0.0
            },
        })
        .collect();

    AgingReport { total, buckets }
}

// "2026-08" etc.; chave e rótulo da série mensal
fn month_label(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    // month 1..=12; aritmética em base zero para facilitar
    let total = year * 12 + (month as i32 - 1) - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

fn build_monthly_evolution(
    rows: &[ReferralReportRow],
    now: DateTime<Utc>,
) -> Vec<MonthlyEvolutionPoint> {
    // Janela móvel terminando no mês corrente, com zero onde não há dado
    let mut points: Vec<MonthlyEvolutionPoint> = (0..EVOLUTION_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = months_back(now.year(), now.month(), back);
            MonthlyEvolutionPoint {
                month: month_label(year, month),
                total_previsto: 0,
                total_realizado: 0,
            }
        })
        .collect();

    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    for (idx, point) in points.iter().enumerate() {
        index.insert(point.month.clone(), idx);
    }

    for row in rows {
        // Previsto entra no mês de criação
        let created_key = month_label(row.created_at.year(), row.created_at.month());
        if let Some(&idx) = index.get(&created_key) {
            points[idx].total_previsto += row.success_fee_expected;
        }

        // Realizado entra no mês do ganho
        if row.status == ReferralStatus::Won
            && let Some(realized) = row.success_fee_realized
        {
            let won_key = month_label(
                row.last_status_update.year(),
                row.last_status_update.month(),
            );
            if let Some(&idx) = index.get(&won_key) {
                points[idx].total_realizado += realized;
            }
        }
    }

    points
}

fn group_by_partner(rows: &[ReferralReportRow]) -> Vec<PartnerCommissionReport> {
    let mut by_partner: BTreeMap<Uuid, PartnerCommissionReport> = BTreeMap::new();

    for row in rows {
        let entry = by_partner
            .entry(row.partner_id)
            .or_insert_with(|| PartnerCommissionReport {
                partner_id: row.partner_id,
                partner_name: row.partner_name.clone(),
                total_referrals: 0,
                total_previsto: 0,
                total_realizado: 0,
            });

        entry.total_referrals += 1;
        entry.total_previsto += row.success_fee_expected;
        entry.total_realizado += row.success_fee_realized.unwrap_or(0);
    }

    let mut reports: Vec<_> = by_partner.into_values().collect();
    reports.sort_by(|a, b| a.partner_name.cmp(&b.partner_name));
    reports
}

// =========================================================================
//  EXPORTAÇÃO CSV
// =========================================================================

const CSV_HEADER: &str = "referralId,partnerName,status,expectedValue,wonValue,successFeeExpected,successFeeRealized,createdAt,lastStatusUpdate";

fn status_label(status: ReferralStatus) -> &'static str {
    match status {
        ReferralStatus::Sent => "SENT",
        ReferralStatus::Acked => "ACKED",
        ReferralStatus::InNegotiation => "IN_NEGOTIATION",
        ReferralStatus::Won => "WON",
        ReferralStatus::Lost => "LOST",
        ReferralStatus::Overdue => "OVERDUE",
    }
}

// Campo de texto livre: aspas quando há vírgula/aspas/quebra de linha
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn build_csv(rows: &[ReferralReportRow], locale: &Locale) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for row in rows {
        let won_value = row
            .won_value
            .map(|v| format_currency(v, locale))
            .unwrap_or_default();
        let realized = row
            .success_fee_realized
            .map(|v| format_currency(v, locale))
            .unwrap_or_default();

        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            row.referral_id,
            csv_escape(&row.partner_name),
            status_label(row.status),
            csv_escape(&format_currency(row.expected_value, locale)),
            csv_escape(&won_value),
            csv_escape(&format_currency(row.success_fee_expected, locale)),
            csv_escape(&realized),
            row.created_at.to_rfc3339(),
            row.last_status_update.to_rfc3339(),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(
        status: ReferralStatus,
        category: &str,
        expected_value: i64,
        fee_expected: i64,
        won: Option<(i64, i64)>,
        created_at: DateTime<Utc>,
    ) -> ReferralReportRow {
        ReferralReportRow {
            referral_id: Uuid::new_v4(),
            partner_id: Uuid::from_u128(1),
            partner_name: "Acme Tecnologia".to_string(),
            category: category.to_string(),
            status,
            expected_value,
            won_value: won.map(|(v, _)| v),
            success_fee_expected: fee_expected,
            success_fee_realized: won.map(|(_, fee)| fee),
            created_at,
            last_status_update: created_at,
        }
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn resumo_soma_previsto_e_realizado() {
        let rows = vec![
            row(ReferralStatus::Won, "ERP", 10_000, 1_500, Some((8_000, 1_200)), at(2026, 7, 1)),
            row(ReferralStatus::Sent, "ERP", 5_000, 750, None, at(2026, 7, 10)),
            row(ReferralStatus::Lost, "CRM", 3_000, 450, None, at(2026, 7, 15)),
        ];

        let summary = summarize(&rows);
        assert_eq!(summary.total_referrals, 3);
        assert_eq!(summary.total_previsto, 2_700);
        assert_eq!(summary.total_realizado, 1_200);
        assert_eq!(summary.leads_won, 1);
        assert_eq!(summary.leads_lost, 1);
        assert_eq!(summary.leads_in_progress, 1);
    }

    #[test]
    fn categoria_calcula_conversao_sem_dividir_por_zero() {
        let rows = vec![
            row(ReferralStatus::Won, "ERP", 10_000, 1_500, Some((8_000, 1_200)), at(2026, 7, 1)),
            row(ReferralStatus::Won, "ERP", 4_000, 600, Some((4_000, 600)), at(2026, 7, 2)),
            row(ReferralStatus::Lost, "ERP", 2_000, 300, None, at(2026, 7, 3)),
            row(ReferralStatus::Acked, "ERP", 1_000, 150, None, at(2026, 7, 4)),
        ];

        let categories = group_by_category(&rows);
        assert_eq!(categories.len(), 1);

        let erp = &categories[0];
        assert_eq!(erp.total_leads, 4);
        assert_eq!(erp.leads_won, 2);
        assert_eq!(erp.leads_lost, 1);
        assert_eq!(erp.leads_in_progress, 1);
        assert_eq!(erp.won_value, 12_000);
        assert!((erp.conversion_rate - 0.5).abs() < 1e-9);

        // Sem linhas: resultado vazio, sem NaN em lugar nenhum
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn conversao_fica_entre_zero_e_um() {
        let rows = vec![
            row(ReferralStatus::Won, "BI", 1_000, 100, Some((1_000, 100)), at(2026, 7, 1)),
        ];
        let categories = group_by_category(&rows);
        assert!((categories[0].conversion_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn aging_soma_exatamente_o_total() {
        let now = at(2026, 8, 8);
        let rows = vec![
            row(ReferralStatus::Sent, "ERP", 1_000, 150, None, at(2026, 8, 5)), // 3 dias
            row(ReferralStatus::Acked, "ERP", 1_000, 150, None, at(2026, 7, 29)), // 10 dias
            row(ReferralStatus::InNegotiation, "ERP", 1_000, 150, None, at(2026, 7, 19)), // 20 dias
            row(ReferralStatus::Overdue, "ERP", 1_000, 150, None, at(2026, 5, 1)), // 99 dias
            // Terminais ficam de fora do aging
            row(ReferralStatus::Won, "ERP", 1_000, 150, Some((1_000, 150)), at(2026, 1, 1)),
            row(ReferralStatus::Lost, "ERP", 1_000, 150, None, at(2026, 1, 2)),
        ];

        let report = build_aging_report(&rows, now);
        assert_eq!(report.total, 4);

        let sum: i64 = report.buckets.iter().map(|b| b.count).sum();
        assert_eq!(sum, report.total);

        assert_eq!(report.buckets[0].count, 1); // 0-7d
        assert_eq!(report.buckets[1].count, 1); // 8-14d
        assert_eq!(report.buckets[2].count, 1); // 15-30d
        assert_eq!(report.buckets[3].count, 1); // 30d+

        let pct_sum: f64 = report.buckets.iter().map(|b| b.percentage).sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn aging_vazio_zera_tudo() {
        let report = build_aging_report(&[], at(2026, 8, 8));
        assert_eq!(report.total, 0);
        for bucket in &report.buckets {
            assert_eq!(bucket.count, 0);
            assert_eq!(bucket.percentage, 0.0);
        }
    }

    #[test]
    fn evolucao_mensal_cobre_12_meses_com_zeros() {
        let now = at(2026, 8, 8);
        let points = build_monthly_evolution(&[], now);

        assert_eq!(points.len(), 12);
        assert_eq!(points[0].month, "2025-09");
        assert_eq!(points[11].month, "2026-08");
        assert!(points.iter().all(|p| p.total_previsto == 0 && p.total_realizado == 0));
    }

    #[test]
    fn evolucao_mensal_separa_previsto_do_realizado() {
        let now = at(2026, 8, 8);

        // Criada em junho, ganha em julho: previsto conta em junho,
        // realizado em julho
        let mut won = row(
            ReferralStatus::Won,
            "ERP",
            10_000,
            1_500,
            Some((8_000, 1_200)),
            at(2026, 6, 10),
        );
        won.last_status_update = at(2026, 7, 20);

        let sent = row(ReferralStatus::Sent, "ERP", 5_000, 750, None, at(2026, 8, 1));

        let points = build_monthly_evolution(&[won, sent], now);

        let june = points.iter().find(|p| p.month == "2026-06").unwrap();
        assert_eq!(june.total_previsto, 1_500);
        assert_eq!(june.total_realizado, 0);

        let july = points.iter().find(|p| p.month == "2026-07").unwrap();
        assert_eq!(july.total_previsto, 0);
        assert_eq!(july.total_realizado, 1_200);

        let august = points.iter().find(|p| p.month == "2026-08").unwrap();
        assert_eq!(august.total_previsto, 750);
    }

    #[test]
    fn virada_de_ano_na_janela_mensal() {
        assert_eq!(months_back(2026, 3, 5), (2025, 10));
        assert_eq!(months_back(2026, 1, 1), (2025, 12));
        assert_eq!(months_back(2026, 12, 0), (2026, 12));
    }

    #[test]
    fn csv_formata_moeda_localizada_e_escapa_texto() {
        let mut r = row(
            ReferralStatus::Won,
            "ERP",
            123_456,
            18_518,
            Some((100_000, 15_000)),
            at(2026, 7, 1),
        );
        r.partner_name = "Silva, Souza & Cia".to_string();

        let csv = build_csv(&[r], &Locale("pt".to_string()));
        let mut lines = csv.lines();

        assert_eq!(lines.next().unwrap(), CSV_HEADER);

        let line = lines.next().unwrap();
        assert!(line.contains("\"Silva, Souza & Cia\""));
        assert!(line.contains("\"R$ 1.234,56\""));
        assert!(line.contains("\"R$ 1.000,00\""));
        assert!(line.contains("WON"));
    }

    #[test]
    fn csv_vazio_so_tem_cabecalho() {
        let csv = build_csv(&[], &Locale("pt".to_string()));
        assert_eq!(csv.trim_end(), CSV_HEADER);
    }

    #[test]
    fn por_parceiro_agrupa_totais() {
        let mut other = row(ReferralStatus::Sent, "CRM", 2_000, 300, None, at(2026, 7, 1));
        other.partner_id = Uuid::from_u128(2);
        other.partner_name = "Beta Solutions".to_string();

        let rows = vec![
            row(ReferralStatus::Won, "ERP", 10_000, 1_500, Some((8_000, 1_200)), at(2026, 7, 1)),
            row(ReferralStatus::Sent, "ERP", 5_000, 750, None, at(2026, 7, 2)),
            other,
        ];

        let reports = group_by_partner(&rows);
        assert_eq!(reports.len(), 2);

        // Ordenado por nome
        assert_eq!(reports[0].partner_name, "Acme Tecnologia");
        assert_eq!(reports[0].total_referrals, 2);
        assert_eq!(reports[0].total_previsto, 2_250);
        assert_eq!(reports[0].total_realizado, 1_200);

        assert_eq!(reports[1].partner_name, "Beta Solutions");
        assert_eq!(reports[1].total_previsto, 300);
    }
}
