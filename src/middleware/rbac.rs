// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::UserRole,
};

/// 1. O trait que define quem passa pelo guardião
pub trait RoleDef: Send + Sync + 'static {
    fn allows(role: UserRole) -> bool;
}

/// 2. O extractor: colocar como argumento do handler já barra a rota
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Reaproveita a extração do usuário (extensions ou token direto)
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !T::allows(user.0.role) {
            let app_state = AppState::from_ref(state);
            let locale = Locale::from_headers(&parts.headers);
            return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS ACEITOS POR ROTA
// ---

/// Só admin: decisões de curadoria, tier, exclusões.
pub struct AdminOnly;
impl RoleDef for AdminOnly {
    fn allows(role: UserRole) -> bool {
        matches!(role, UserRole::Admin)
    }
}

/// Admin ou gerente: operação do dia a dia do marketplace.
pub struct StaffOnly;
impl RoleDef for StaffOnly {
    fn allows(role: UserRole) -> bool {
        matches!(role, UserRole::Admin | UserRole::Gerente)
    }
}
