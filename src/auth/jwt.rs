use jsonwebtoken::{decode, Algorithm, DecodingKey, Header, Validation};

use super::{claims::SupabaseClaims, jwks::JwksCache};

pub const EXPECTED_AUDIENCE: &str = "authenticated";

/// Validates a Supabase access token.
///
/// HS256 tokens are checked against the project's shared secret when one is
/// configured; asymmetric tokens against the key named by `kid` in the JWKS.
pub async fn validate_jwt(
    token: &str,
    jwks_cache: &JwksCache,
    jwt_secret: Option<&str>,
    expected_issuer: &str,
) -> Result<SupabaseClaims, String> {
    let header = decode_header(token)?;

    let decoding_key = match (header.alg, jwt_secret) {
        (Algorithm::HS256, Some(secret)) => DecodingKey::from_secret(secret.as_bytes()),
        (Algorithm::HS256, None) => return Err("HS256 tokens are not accepted".to_string()),
        (Algorithm::RS256 | Algorithm::ES256, _) => {
            let kid = header.kid.as_deref().ok_or("Missing kid in JWT header")?;
            jwks_cache.get_decoding_key(kid).await?
        }
        (other, _) => return Err(format!("Unsupported JWT algorithm: {:?}", other)),
    };

    validate_with_key(token, &decoding_key, header.alg, expected_issuer)
}

fn validate_with_key(
    token: &str,
    decoding_key: &DecodingKey,
    alg: Algorithm,
    expected_issuer: &str,
) -> Result<SupabaseClaims, String> {
    let mut validation = Validation::new(alg);
    validation.set_issuer(&[expected_issuer]);
    validation.set_audience(&[EXPECTED_AUDIENCE]);
    validation.validate_exp = true;

    let token_data = decode::<SupabaseClaims>(token, decoding_key, &validation)
        .map_err(|e| format!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

fn decode_header(token: &str) -> Result<Header, String> {
    jsonwebtoken::decode_header(token).map_err(|e| format!("Failed to decode JWT header: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey};
    use serde_json::json;

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";
    const ISSUER: &str = "https://abc.supabase.co/auth/v1";

    fn token(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(iss: &str, aud: &str, exp_offset: i64) -> serde_json::Value {
        json!({
            "sub": "9b2f3c1e-8a4d-4a57-9d1e-0f6f1c2b7a11",
            "aud": aud,
            "iss": iss,
            "exp": chrono::Utc::now().timestamp() + exp_offset,
            "email": "dev@example.com",
            "role": "authenticated"
        })
    }

    fn cache() -> JwksCache {
        JwksCache::new("http://127.0.0.1:9/jwks.json", reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_accepts_valid_hs256_token() {
        let jwt = token(claims(ISSUER, "authenticated", 3600), SECRET);
        let claims = validate_jwt(&jwt, &cache(), Some(SECRET), ISSUER).await.unwrap();

        assert_eq!(claims.email.as_deref(), Some("dev@example.com"));
        assert_eq!(claims.role.as_deref(), Some("authenticated"));
    }

    #[tokio::test]
    async fn test_rejects_wrong_secret_issuer_or_expiry() {
        let wrong_secret = token(claims(ISSUER, "authenticated", 3600), "another-secret-of-sufficient-length!!");
        assert!(validate_jwt(&wrong_secret, &cache(), Some(SECRET), ISSUER).await.is_err());

        let wrong_issuer = token(claims("https://evil.example/auth/v1", "authenticated", 3600), SECRET);
        assert!(validate_jwt(&wrong_issuer, &cache(), Some(SECRET), ISSUER).await.is_err());

        let expired = token(claims(ISSUER, "authenticated", -3600), SECRET);
        assert!(validate_jwt(&expired, &cache(), Some(SECRET), ISSUER).await.is_err());

        let anon = token(claims(ISSUER, "anon", 3600), SECRET);
        assert!(validate_jwt(&anon, &cache(), Some(SECRET), ISSUER).await.is_err());
    }

    #[tokio::test]
    async fn test_hs256_refused_without_secret() {
        let jwt = token(claims(ISSUER, "authenticated", 3600), SECRET);
        let err = validate_jwt(&jwt, &cache(), None, ISSUER).await.unwrap_err();
        assert!(err.contains("HS256"));
    }

    #[tokio::test]
    async fn test_garbage_token() {
        assert!(validate_jwt("not-a-jwt", &cache(), Some(SECRET), ISSUER).await.is_err());
    }
}
