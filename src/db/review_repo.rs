// src/db/review_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::review::Review};

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        partner_id: Uuid,
        user_id: Uuid,
        reviewer_name: &str,
        reviewer_company: &str,
        rating: i16,
        comment: &str,
        is_verified: bool,
    ) -> Result<Review, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (
                partner_id, user_id, reviewer_name, reviewer_company,
                rating, comment, is_verified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(partner_id)
        .bind(user_id)
        .bind(reviewer_name)
        .bind(reviewer_company)
        .bind(rating)
        .bind(comment)
        .bind(is_verified)
        .fetch_one(executor)
        .await?;

        Ok(review)
    }

    pub async fn list_all(&self) -> Result<Vec<Review>, AppError> {
        let reviews = sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(reviews)
    }

    pub async fn list_by_partner(&self, partner_id: Uuid) -> Result<Vec<Review>, AppError> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE partner_id = $1 ORDER BY created_at DESC",
        )
        .bind(partner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Notas cruas para o agregado (média + contagem) do perfil.
    pub async fn ratings_by_partner(&self, partner_id: Uuid) -> Result<Vec<i16>, AppError> {
        let ratings =
            sqlx::query_scalar::<_, i16>("SELECT rating FROM reviews WHERE partner_id = $1")
                .bind(partner_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ratings)
    }
}
