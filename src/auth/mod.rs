pub mod admin_api;
pub mod claims;
pub mod jwks;
pub mod jwt;

pub use admin_api::list_auth_users;
pub use jwks::JwksCache;
pub use jwt::validate_jwt;
