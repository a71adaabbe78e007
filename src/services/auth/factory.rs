/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::{AccessKey, Config};
use crate::error::AppError;
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, AppError> {
    let auth = match &config.access_key {
        AccessKey::Ed25519PublicPem(pem) => AuthService::from_ed_pem(
            pem,
            &config.auth_issuer,
            &config.auth_audience,
            config.access_token_leeway_seconds,
        )
        .map_err(|e| {
            tracing::error!(error = %e, "failed to load access token public key");
            AppError::Internal
        })?,
        AccessKey::SharedSecret(secret) => {
            tracing::warn!("access tokens are verified with a shared secret (development only)");
            AuthService::from_secret(
                secret.as_bytes(),
                &config.auth_issuer,
                &config.auth_audience,
                config.access_token_leeway_seconds,
            )
        }
    };

    Ok(Arc::new(auth))
}
