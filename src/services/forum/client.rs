//! Contracts of the forum domain layer the post routes delegate to.
//!
//! Storage, vote aggregation and privilege policy live behind these traits;
//! the HTTP layer only sees their results.
use async_trait::async_trait;
use thiserror::Error;

use super::types::{EditPostPayload, PostFields, TopicFields, VoteResult};

pub type ForumResult<T> = Result<T, ForumError>;

/// Errors raised by the domain layer.
///
/// Kept independent from `AppError`; the mapping to HTTP lives in `crate::error`.
#[derive(Debug, Error)]
pub enum ForumError {
    #[error("no privileges")]
    NoPrivileges,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait PostService: Send + Sync + 'static {
    async fn exists(&self, pid: &str) -> ForumResult<bool>;

    // Returns `None` when the post does not exist.
    async fn get_post_fields(&self, pid: &str) -> ForumResult<Option<PostFields>>;

    async fn edit(&self, payload: EditPostPayload) -> ForumResult<()>;

    // Permanent removal.
    async fn purge(&self, pid: &str, uid: i64) -> ForumResult<()>;

    async fn restore(&self, pid: &str, uid: i64) -> ForumResult<()>;

    // Soft delete; reversible through `restore`.
    async fn delete(&self, pid: &str, uid: i64) -> ForumResult<()>;

    async fn upvote(&self, pid: &str, uid: i64) -> ForumResult<VoteResult>;

    async fn downvote(&self, pid: &str, uid: i64) -> ForumResult<VoteResult>;

    async fn unvote(&self, pid: &str, uid: i64) -> ForumResult<VoteResult>;

    async fn bookmark(&self, pid: &str, uid: i64) -> ForumResult<()>;

    async fn unbookmark(&self, pid: &str, uid: i64) -> ForumResult<()>;
}

#[async_trait]
pub trait TopicService: Send + Sync + 'static {
    async fn get_topic_fields(&self, tid: &str) -> ForumResult<Option<TopicFields>>;
}

#[async_trait]
pub trait PrivilegeService: Send + Sync + 'static {
    /// Category-scoped privilege check, e.g. `can("topics:read", cid, uid)`.
    async fn can(&self, privilege: &str, cid: &str, uid: i64) -> ForumResult<bool>;
}
