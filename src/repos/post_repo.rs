/*
 * Responsibility
 * - posts table: lookups, edit, soft delete / restore, purge
 * - purge relies on FK ON DELETE CASCADE for votes and bookmarks
 */
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub pid: i64,
    pub tid: i64,
    pub uid: i64,
    pub deleted: bool,
}

pub async fn get(pool: &PgPool, pid: i64) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT pid, tid, uid, deleted
        FROM posts
        WHERE pid = $1
        "#,
    )
    .bind(pid)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn exists(pool: &PgPool, pid: i64) -> Result<bool, RepoError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (SELECT 1 FROM posts WHERE pid = $1)
        "#,
    )
    .bind(pid)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn update_content(
    tx: &mut Transaction<'_, Postgres>,
    pid: i64,
    editor: i64,
    content: &str,
    handle: Option<&str>,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        UPDATE posts
        SET
            content = $3,
            handle = COALESCE($4, handle),
            editor = $2,
            edited = $5
        WHERE pid = $1
        "#,
    )
    .bind(pid)
    .bind(editor)
    .bind(content)
    .bind(handle)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn set_deleted(
    pool: &PgPool,
    pid: i64,
    uid: i64,
    deleted: bool,
) -> Result<bool, RepoError> {
    // deleted_by / deleted_at are cleared again on restore
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET
            deleted = $2,
            deleted_by = CASE WHEN $2 THEN $3 ELSE NULL END,
            deleted_at = CASE WHEN $2 THEN $4 ELSE NULL END
        WHERE pid = $1
        "#,
    )
    .bind(pid)
    .bind(deleted)
    .bind(uid)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn purge(pool: &PgPool, pid: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE pid = $1
        "#,
    )
    .bind(pid)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
