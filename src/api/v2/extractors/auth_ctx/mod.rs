/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the request's identity (AuthCtx) to handlers as an explicit value
 * - axum-specific code stays in core, the type lives in types
 *
 * Public API:
 * - AuthCtx / AuthUser
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::{AuthCtx, AuthUser};
