use serde::{Deserialize, Serialize};

/// Claims carried by a Supabase access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseClaims {
    pub sub: String,           // auth.users id (uuid)
    pub exp: i64,              // Expiration timestamp
    #[serde(default)]
    pub iat: Option<i64>,      // Issued at timestamp
    pub iss: String,           // Issuer
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,  // "authenticated" for signed-in users
}
