use jsonwebtoken::Algorithm;
use std::env;

/// Process configuration, loaded once at startup and passed into
/// constructors.
#[derive(Debug, Clone)]
pub struct Config {
    pub http_address: String,
    pub storage_path: String,
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let http_address =
            env::var("HTTP_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8069".to_string());

        let storage_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "wishlist.db".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "default_jwt_secret_change_me".to_string()
        });

        let jwt_algorithm = env::var("JWT_ALGORITHM")
            .ok()
            .and_then(|v| v.parse::<Algorithm>().ok())
            .unwrap_or(Algorithm::HS256);

        Self {
            http_address,
            storage_path,
            jwt_secret,
            jwt_algorithm,
        }
    }
}
