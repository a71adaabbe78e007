/*
 * Responsibility
 * - post_votes table (one row per (pid, uid), vote = 1 or -1)
 * - keeps posts.upvotes / posts.downvotes in step inside the same transaction
 */
use sqlx::{Postgres, Transaction};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VoteCountsRow {
    pub pid: i64,
    pub uid: i64,
    pub upvotes: i64,
    pub downvotes: i64,
}

/// Lock the post row for the duration of the vote; returns its author.
pub async fn lock_post_author(
    tx: &mut Transaction<'_, Postgres>,
    pid: i64,
) -> Result<Option<i64>, RepoError> {
    let author: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT uid
        FROM posts
        WHERE pid = $1 AND NOT deleted
        FOR UPDATE
        "#,
    )
    .bind(pid)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(author)
}

pub async fn set_vote(
    tx: &mut Transaction<'_, Postgres>,
    pid: i64,
    uid: i64,
    vote: i16,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        INSERT INTO post_votes (pid, uid, vote)
        VALUES ($1, $2, $3)
        ON CONFLICT (pid, uid) DO UPDATE SET vote = EXCLUDED.vote
        "#,
    )
    .bind(pid)
    .bind(uid)
    .bind(vote)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn clear_vote(
    tx: &mut Transaction<'_, Postgres>,
    pid: i64,
    uid: i64,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        DELETE FROM post_votes
        WHERE pid = $1 AND uid = $2
        "#,
    )
    .bind(pid)
    .bind(uid)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn recount(
    tx: &mut Transaction<'_, Postgres>,
    pid: i64,
) -> Result<VoteCountsRow, RepoError> {
    let row = sqlx::query_as::<_, VoteCountsRow>(
        r#"
        UPDATE posts
        SET
            upvotes = (SELECT COUNT(*) FROM post_votes WHERE pid = $1 AND vote > 0),
            downvotes = (SELECT COUNT(*) FROM post_votes WHERE pid = $1 AND vote < 0)
        WHERE pid = $1
        RETURNING pid, uid, upvotes, downvotes
        "#,
    )
    .bind(pid)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row)
}

pub async fn author_reputation(
    tx: &mut Transaction<'_, Postgres>,
    author: i64,
) -> Result<i64, RepoError> {
    let reputation: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(upvotes - downvotes), 0)::bigint
        FROM posts
        WHERE uid = $1
        "#,
    )
    .bind(author)
    .fetch_one(&mut **tx)
    .await?;

    Ok(reputation)
}
