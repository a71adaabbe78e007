/*
 * Responsibility
 * - public interface of the middleware layer
 * - auth: identity resolution + capabilities (requireUser / validatePid)
 * - cors / http / security_headers: transport concerns applied in app.rs
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
