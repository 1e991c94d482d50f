//! Supabase JWT authentication.
//!
//! Supabase signs access tokens with a shared HS256 secret and the fixed
//! audience `authenticated`; verification is local, no key fetching.
//! Auth is optional end to end: without `SUPABASE_JWT_SECRET` protected
//! routes answer 503 and the generation routes run anonymously.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Audience claim Supabase sets on user access tokens.
const SUPABASE_AUDIENCE: &str = "authenticated";

/// Decoded Supabase access token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseClaims {
    /// User ID
    pub sub: String,
    /// Email (if available)
    pub email: Option<String>,
    /// Expiration
    pub exp: i64,
}

/// Verifies Supabase access tokens against the shared project secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[SUPABASE_AUDIENCE]);
        // An expired token is rejected immediately, no leeway window
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Build from `SUPABASE_JWT_SECRET`; `None` when auth is not configured.
    pub fn from_env() -> Option<Self> {
        let secret = std::env::var("SUPABASE_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())?;
        Some(Self::new(&secret))
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<SupabaseClaims, ApiError> {
        let data = decode::<SupabaseClaims>(token, &self.key, &self.validation)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {e}")))?;
        debug!(user_id = %data.claims.sub, "authenticated user");
        Ok(data.claims)
    }
}

/// Authenticated user extracted from the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
}

impl From<SupabaseClaims> for AuthUser {
    fn from(claims: SupabaseClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(header) = parts.headers.get("Authorization") else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header format"))
}

/// Axum extractor for routes that require authentication.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let verifier = state
            .verifier
            .as_ref()
            .ok_or_else(|| ApiError::unavailable("Authentication service not configured"))?;

        let token = bearer_token(parts)?
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        Ok(AuthUser::from(verifier.verify(token)?))
    }
}

/// Optional authentication: `None` when no credentials were presented or
/// auth is not configured, 401 when a presented token fails to verify.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(verifier) = state.verifier.as_ref() else {
            return Ok(MaybeUser(None));
        };
        let Some(token) = bearer_token(parts)? else {
            return Ok(MaybeUser(None));
        };
        Ok(MaybeUser(Some(AuthUser::from(verifier.verify(token)?))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn make_token(secret: &str, claims: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_valid_token_verifies() {
        let verifier = TokenVerifier::new("test-secret");
        let token = make_token(
            "test-secret",
            json!({
                "sub": "user-1",
                "aud": "authenticated",
                "email": "a@b.co",
                "exp": future_exp()
            }),
        );
        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("a@b.co"));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let verifier = TokenVerifier::new("test-secret");
        let token = make_token(
            "test-secret",
            json!({"sub": "user-1", "aud": "anon", "exp": future_exp()}),
        );
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = TokenVerifier::new("test-secret");
        let token = make_token(
            "other-secret",
            json!({"sub": "user-1", "aud": "authenticated", "exp": future_exp()}),
        );
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = TokenVerifier::new("test-secret");
        let token = make_token(
            "test-secret",
            json!({
                "sub": "user-1",
                "aud": "authenticated",
                "exp": chrono::Utc::now().timestamp() - 60
            }),
        );
        assert!(verifier.verify(&token).is_err());
    }
}
