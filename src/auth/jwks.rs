use jsonwebtoken::{jwk::JwkSet, DecodingKey};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

pub struct JwksCache {
    cache: Cache<String, Arc<JwkSet>>,
    jwks_url: String,
    client: reqwest::Client,
}

impl JwksCache {
    pub fn new(jwks_url: impl Into<String>, client: reqwest::Client) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(600)) // Supabase rotates keys with a 10 min overlap
            .build();

        Self {
            cache,
            jwks_url: jwks_url.into(),
            client,
        }
    }

    pub async fn get_jwks(&self) -> Result<Arc<JwkSet>, String> {
        if let Some(jwks) = self.cache.get(&self.jwks_url).await {
            return Ok(jwks);
        }

        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch JWKS: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("JWKS endpoint returned {}", response.status()));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse JWKS: {}", e))?;

        let jwks_arc = Arc::new(jwks);
        self.cache.insert(self.jwks_url.clone(), jwks_arc.clone()).await;

        Ok(jwks_arc)
    }

    pub async fn get_decoding_key(&self, kid: &str) -> Result<DecodingKey, String> {
        let jwks = self.get_jwks().await?;

        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.common.key_id.as_deref() == Some(kid))
            .ok_or_else(|| format!("No key found with kid: {}", kid))?;

        DecodingKey::from_jwk(jwk).map_err(|e| format!("Failed to create decoding key: {}", e))
    }
}
