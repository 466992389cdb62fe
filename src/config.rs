use axum::http::HeaderValue;
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub supabase_url: String,
    /// Legacy HS256 signing secret; when unset tokens are checked against the JWKS
    pub supabase_jwt_secret: Option<String>,
    pub supabase_service_role_key: Option<String>,
    /// `None` when ADMIN_EMAILS is not configured at all
    pub admin_emails: Option<Vec<String>>,
    pub allowed_origin: HeaderValue,
    pub listen_addr: String,
    pub nager_api_url: String,
    pub timor_api_url: String,
    pub run_migrations: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("{} must be set", key))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = required("DATABASE_URL")?;
        let supabase_url = required("SUPABASE_URL")?
            .trim_end_matches('/')
            .to_string();

        let admin_emails = optional("ADMIN_EMAILS").map(|raw| {
            raw.split(',')
                .map(|email| email.trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect()
        });

        let origin = optional("ALLOWED_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());
        let allowed_origin = HeaderValue::from_str(&origin)
            .map_err(|_| format!("ALLOWED_ORIGIN is not a valid header value: {}", origin))?;

        let run_migrations = match optional("RUN_MIGRATIONS").as_deref() {
            None => false,
            Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(other) => return Err(format!("RUN_MIGRATIONS must be true or false, got {}", other)),
        };

        Ok(Self {
            database_url,
            supabase_url,
            supabase_jwt_secret: optional("SUPABASE_JWT_SECRET"),
            supabase_service_role_key: optional("SUPABASE_SERVICE_ROLE_KEY"),
            admin_emails,
            allowed_origin,
            listen_addr: optional("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            nager_api_url: optional("NAGER_API_URL")
                .unwrap_or_else(|| "https://date.nager.at".to_string()),
            timor_api_url: optional("TIMOR_API_URL")
                .unwrap_or_else(|| "https://timor.tech".to_string()),
            run_migrations,
        })
    }

    /// Issuer claim Supabase puts in access tokens.
    pub fn auth_issuer(&self) -> String {
        format!("{}/auth/v1", self.supabase_url)
    }

    pub fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.auth_issuer())
    }

    /// Case-insensitive match against ADMIN_EMAILS.
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails
            .as_ref()
            .is_some_and(|admins| admins.iter().any(|admin| *admin == email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_requires_database_and_supabase_urls() {
        let err = config_from(&[("SUPABASE_URL", "https://x.supabase.co")]).unwrap_err();
        assert!(err.contains("DATABASE_URL"));

        let err = config_from(&[("DATABASE_URL", "postgres://localhost/wio")]).unwrap_err();
        assert!(err.contains("SUPABASE_URL"));
    }

    #[test]
    fn test_defaults_and_derived_urls() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/wio"),
            ("SUPABASE_URL", "https://abc.supabase.co/"),
        ])
        .unwrap();

        assert_eq!(config.auth_issuer(), "https://abc.supabase.co/auth/v1");
        assert_eq!(
            config.jwks_url(),
            "https://abc.supabase.co/auth/v1/.well-known/jwks.json"
        );
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.nager_api_url, "https://date.nager.at");
        assert!(config.admin_emails.is_none());
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_admin_emails_are_case_insensitive() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/wio"),
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("ADMIN_EMAILS", " Ops@Example.com ,lead@example.com,"),
        ])
        .unwrap();

        assert!(config.is_admin_email("ops@example.com"));
        assert!(config.is_admin_email("LEAD@example.com "));
        assert!(!config.is_admin_email("intern@example.com"));
        assert_eq!(config.admin_emails.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_rejects_bad_migration_flag() {
        let err = config_from(&[
            ("DATABASE_URL", "postgres://localhost/wio"),
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("RUN_MIGRATIONS", "sometimes"),
        ])
        .unwrap_err();
        assert!(err.contains("RUN_MIGRATIONS"));
    }
}
