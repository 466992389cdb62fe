use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use crate::{auth, AppState};

const SESSION_COOKIE: &str = "sb-access-token";

type Rejection = (StatusCode, axum::Json<serde_json::Value>);

fn reject(status: StatusCode, message: impl Into<String>) -> Rejection {
    (status, axum::Json(json!({"error": message.into()})))
}

/// Extracts the access token from the Authorization header (API clients) or the
/// Supabase session cookie (browser).
fn extract_token_from_request(parts: &Parts) -> Option<String> {
    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.trim().to_string());
            }
        }
    }

    let prefix = format!("{}=", SESSION_COOKIE);
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = Rejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = extract_token_from_request(parts);
        let state = state.clone();

        async move {
            let token = token.ok_or_else(|| {
                reject(
                    StatusCode::UNAUTHORIZED,
                    format!("Missing authentication: no Authorization header or {} cookie", SESSION_COOKIE),
                )
            })?;

            let claims = auth::validate_jwt(
                &token,
                &state.jwks_cache,
                state.config.supabase_jwt_secret.as_deref(),
                &state.config.auth_issuer(),
            )
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                reject(StatusCode::UNAUTHORIZED, e)
            })?;

            let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
                tracing::warn!(sub = %claims.sub, "Token subject is not a uuid");
                reject(StatusCode::UNAUTHORIZED, "Invalid token subject")
            })?;

            tracing::Span::current().record("user_id", tracing::field::display(user_id));

            Ok(AuthenticatedUser {
                user_id,
                email: claims.email,
            })
        }
    }
}

/// A signed-in user whose email is on the ADMIN_EMAILS list.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = Rejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if state.config.admin_emails.is_none() {
            tracing::warn!(user_id = %user.user_id, "Admin access attempted but ADMIN_EMAILS is not configured");
            return Err(reject(StatusCode::FORBIDDEN, "Admin access is not configured"));
        }

        let is_admin = user
            .email
            .as_deref()
            .is_some_and(|email| state.config.is_admin_email(email));

        if !is_admin {
            tracing::warn!(user_id = %user.user_id, "Non-admin user denied");
            return Err(reject(StatusCode::FORBIDDEN, "Admin access required"));
        }

        Ok(AdminUser(user))
    }
}
