use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use thiserror::Error;

use crate::api::AppState;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,
    #[error("Invalid Authorization header format")]
    InvalidHeader,
    #[error("Invalid or expired token")]
    InvalidToken,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64, // user_id
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at
}

/// Verifies a bearer token and resolves the caller's identity.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<i64, AuthError>;
}

pub struct JwtVerifier {
    secret: String,
    algorithm: Algorithm,
}

impl JwtVerifier {
    pub fn new(secret: impl Into<String>, algorithm: Algorithm) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
        }
    }

    /// Generate a JWT token for a user
    pub fn issue(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + Duration::days(7)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(self.algorithm),
        )
        .map_err(|_| AuthError::InvalidToken)?;
        Ok(token_data.claims.sub)
    }
}

/// Authenticated caller identity extracted from the Authorization header
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_auth(req))
    }
}

fn extract_auth(req: &HttpRequest) -> Result<AuthUser, actix_web::Error> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App state missing"))?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ErrorUnauthorized(AuthError::MissingHeader))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ErrorUnauthorized(AuthError::InvalidHeader))?;

    let user_id = state.verifier.verify(token).map_err(ErrorUnauthorized)?;
    Ok(AuthUser { user_id })
}
