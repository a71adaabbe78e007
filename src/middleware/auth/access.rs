//! Access token verification → `AuthCtx` in request extensions.
//!
//! - No `Authorization` header: the request continues as a guest (fallback uid 0).
//! - `Authorization: Bearer <jwt>`: the token must verify; its `sub` becomes the user's uid.
//! - Anything else in `Authorization` is rejected with 401.
//!
//! Whether a route needs a user is decided later by `require_user`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v2::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Apply identity resolution to a router.
///
/// ```ignore
/// let v2 = api::v2::routes(state.clone());
/// let v2 = middleware::auth::access::apply(v2, state.clone());
/// app = app.nest("/api/v2", v2);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 from_fn cannot take a State extractor, so the state is passed explicitly
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_ctx = match req.headers().get(header::AUTHORIZATION) {
        None => AuthCtx::guest(),
        Some(value) => {
            let token = value
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or(AppError::Unauthorized)?;

            let verified = match state.auth.verify_verified(token) {
                Ok(verified) => verified,
                Err(err) => {
                    tracing::warn!(error = %err, "access token verification failed");
                    return Err(AppError::Unauthorized);
                }
            };

            let mut ctx = AuthCtx::for_user(verified.uid);
            ctx.jti = verified.jti;
            ctx.roles = verified.roles.unwrap_or_default();
            tracing::debug!(
                uid = verified.uid,
                jti = ?ctx.jti,
                roles = ?ctx.roles,
                "access token accepted"
            );
            ctx
        }
    };

    // middleware → extractor hand-off
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
