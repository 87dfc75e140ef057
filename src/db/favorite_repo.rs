// src/db/favorite_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::favorite::FavoriteEntry};

#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotente: favoritar duas vezes não duplica nem falha.
    pub async fn add(&self, user_id: Uuid, offer_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, offer_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, offer_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(offer_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove(&self, user_id: Uuid, offer_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND offer_id = $2")
            .bind(user_id)
            .bind(offer_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<FavoriteEntry>, AppError> {
        let favorites = sqlx::query_as::<_, FavoriteEntry>(
            r#"
            SELECT
                f.offer_id,
                o.title AS offer_title,
                o.category AS offer_category,
                p.company_name AS partner_name,
                f.created_at AS favorited_at
            FROM favorites f
            JOIN offers o ON o.id = f.offer_id
            JOIN partners p ON p.id = o.partner_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }
}
