pub mod access;
pub mod require_user;
pub mod validate_pid;
