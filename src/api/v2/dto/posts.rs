/*
 * Responsibility
 * - request/response DTOs of the /posts routes
 * - required-field checks (the handler stops before any forum call when they fail)
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::services::forum::VoteDirection;

#[derive(Debug, Default, Deserialize)]
pub struct EditPostRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub topic_thumb: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl EditPostRequest {
    /// Takes `content` out of the request; it is the only required field.
    pub fn take_content(&mut self) -> Result<String, AppError> {
        self.content
            .take()
            .ok_or_else(|| AppError::params_missing(&["content"]))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VoteRequest {
    // Kept loose: clients send numbers, some send numeric strings.
    #[serde(default)]
    pub delta: Option<Value>,
}

impl VoteRequest {
    pub fn direction(&self) -> Result<VoteDirection, AppError> {
        let delta = match &self.delta {
            None | Some(Value::Null) => return Err(AppError::params_missing(&["delta"])),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        }
        .filter(|d| !d.is_nan())
        .ok_or_else(|| AppError::bad_request("delta must be numeric"))?;

        Ok(VoteDirection::from_delta(delta))
    }
}

/// Success envelope of the write API: `{"code": "ok", "payload": ...}`.
#[derive(Debug, Serialize)]
pub struct OkResponse<T> {
    pub code: &'static str,
    pub payload: T,
}

impl<T: Serialize> OkResponse<T> {
    pub fn new(payload: T) -> Self {
        Self {
            code: "ok",
            payload,
        }
    }
}

/// Serializes as `{}`.
#[derive(Debug, Default, Serialize)]
pub struct EmptyPayload {}

impl OkResponse<EmptyPayload> {
    pub fn empty() -> Self {
        Self::new(EmptyPayload {})
    }
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub status: &'static str,
    pub bookmarked: bool,
}

impl BookmarkResponse {
    pub fn new(bookmarked: bool) -> Self {
        Self {
            status: "ok",
            bookmarked,
        }
    }
}
