/*
 * Responsibility
 * - post_bookmarks table; both operations are idempotent
 */
use chrono::Utc;
use sqlx::PgPool;

use crate::repos::error::RepoError;

pub async fn add(pool: &PgPool, pid: i64, uid: i64) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        INSERT INTO post_bookmarks (pid, uid, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (pid, uid) DO NOTHING
        "#,
    )
    .bind(pid)
    .bind(uid)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn remove(pool: &PgPool, pid: i64, uid: i64) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        DELETE FROM post_bookmarks
        WHERE pid = $1 AND uid = $2
        "#,
    )
    .bind(pid)
    .bind(uid)
    .execute(pool)
    .await?;

    Ok(())
}
