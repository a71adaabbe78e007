//! `validatePid` capability: the `{pid}` in the path must name an existing post.
//!
//! - blank pid → 400 (from the `PostPid` extractor)
//! - lookup failure → mapped forum error
//! - unknown post → 404

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::api::v2::extractors::PostPid;
use crate::error::AppError;
use crate::state::AppState;

pub async fn validate_pid(
    State(state): State<AppState>,
    pid: PostPid,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !state.posts.exists(pid.as_str()).await? {
        return Err(AppError::not_found("post"));
    }

    Ok(next.run(req).await)
}
