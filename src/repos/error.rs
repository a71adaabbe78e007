/**
 * Responsibility
 * - what the repos report upwards
 * - conversion into the forum error the handlers understand
 */
use thiserror::Error;

use crate::services::forum::ForumError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
}

impl From<RepoError> for ForumError {
    fn from(e: RepoError) -> Self {
        ForumError::Backend(e.into())
    }
}

/// Parse a client-supplied id; anything but plain digits naming a positive integer names nothing.
pub fn parse_id(raw: &str, resource: &'static str) -> Result<i64, ForumError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ForumError::NotFound(resource));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ForumError::NotFound(resource)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers_only() {
        assert_eq!(parse_id("123", "post").unwrap(), 123);
        for raw in ["0", "-1", "abc", "", "1.5", " 123", "123 ", "+5"] {
            assert!(
                matches!(parse_id(raw, "post"), Err(ForumError::NotFound("post"))),
                "{raw}"
            );
        }
    }
}
