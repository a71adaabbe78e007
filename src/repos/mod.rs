/*
 * Responsibility
 * - Postgres adapter behind the forum contracts (services::forum)
 * - one file per table family, free functions taking &PgPool
 * - PgForum ties them together and implements PostService / TopicService / PrivilegeService
 */
pub mod bookmark_repo;
pub mod error;
pub mod pg_forum;
pub mod post_repo;
pub mod privilege_repo;
pub mod topic_repo;
pub mod vote_repo;

pub use pg_forum::PgForum;
