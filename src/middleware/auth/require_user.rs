//! `requireUser` capability: the request must carry an authenticated user.
//!
//! Runs after `access` has attached an `AuthCtx`; a guest (or a request the
//! access middleware never saw) is rejected with 401 before the handler runs.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::api::v2::extractors::AuthCtx;
use crate::error::AppError;

pub async fn require_user(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let authenticated = req
        .extensions()
        .get::<AuthCtx>()
        .is_some_and(AuthCtx::is_authenticated);

    if !authenticated {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}
