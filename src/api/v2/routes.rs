/*
 * Responsibility
 * - URL layout of v2: /health and /posts/{pid}...
 * - which capability guards which route:
 *   - every /posts route: requireUser
 *   - purge and /state: validatePid as well
 */
use axum::{
    Router,
    middleware,
    routing::{delete, get, post, put},
};

use crate::api::v2::handlers::{
    health::health,
    posts::{
        bookmark_post, delete_post, edit_post, purge_post, restore_post, unbookmark_post,
        unvote_post, vote_post,
    },
};
use crate::middleware::auth::{require_user::require_user, validate_pid::validate_pid};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/posts", post_routes(state))
}

fn post_routes(state: AppState) -> Router<AppState> {
    let validate_pid = middleware::from_fn_with_state(state, validate_pid);

    Router::new()
        .route(
            "/{pid}",
            put(edit_post).merge(delete(purge_post).route_layer(validate_pid.clone())),
        )
        .route(
            "/{pid}/state",
            put(restore_post)
                .delete(delete_post)
                .route_layer(validate_pid),
        )
        .route("/{pid}/vote", post(vote_post).delete(unvote_post))
        .route("/{pid}/bookmark", post(bookmark_post).delete(unbookmark_post))
        .route_layer(middleware::from_fn(require_user))
}
