// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Avaliações são imutáveis depois de criadas; só agregamos.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub partner_id: Uuid,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub user_id: Uuid,

    pub reviewer_name: String,
    pub reviewer_company: String,

    // 1..=5, validado na borda
    #[schema(example = 5)]
    pub rating: i16,
    pub comment: String,

    // Marcada quando a elegibilidade veio de contrato aprovado
    pub is_verified: bool,

    pub created_at: DateTime<Utc>,
}

// Agregado exibido no perfil do parceiro
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    #[schema(example = 4.6f64)]
    pub average_rating: f64,
    pub total_reviews: i64,
}

impl ReviewSummary {
    /// Média simples das notas; zero avaliações vira média 0, nunca NaN.
    pub fn from_ratings(ratings: &[i16]) -> Self {
        let total = ratings.len() as i64;
        let average = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / total as f64
        };
        Self {
            average_rating: average,
            total_reviews: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_simples_das_notas() {
        let summary = ReviewSummary::from_ratings(&[5, 4, 3]);
        assert_eq!(summary.total_reviews, 3);
        assert!((summary.average_rating - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sem_avaliacoes_nao_divide_por_zero() {
        let summary = ReviewSummary::from_ratings(&[]);
        assert_eq!(summary.total_reviews, 0);
        assert_eq!(summary.average_rating, 0.0);
    }
}
