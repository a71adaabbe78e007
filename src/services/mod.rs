/*
 * Responsibility
 * - collaborators the handlers delegate to (forum domain contracts, access-token verification)
 */
pub mod auth;
pub mod forum;
