/*
 * Responsibility
 * - take the `{pid}` path segment as a post identifier
 * - reject an empty segment with 400 before any handler or middleware runs
 * - the pid stays exactly the string the client sent (no trimming); the forum
 *   layer owns its format
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPid(pub String);

impl PostPid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for PostPid
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(pid) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::params_missing(&["pid"]))?;

        if pid.is_empty() {
            return Err(AppError::params_missing(&["pid"]));
        }
        Ok(Self(pid))
    }
}
