/*
 * Responsibility
 * - request-part extractors shared by the v2 handlers and middleware
 */
pub mod auth_ctx;
pub mod json_body;
pub mod pid;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor, AuthUser};
pub use json_body::JsonBody;
pub use pid::PostPid;
