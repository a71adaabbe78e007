/*
 * Responsibility
 * - topics table: category lookup, title / thumbnail / tags updates from post edits
 */
use sqlx::{PgPool, Postgres, Transaction};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopicRow {
    pub cid: i64,
    pub main_pid: Option<i64>,
}

pub async fn get(pool: &PgPool, tid: i64) -> Result<Option<TopicRow>, RepoError> {
    let row = sqlx::query_as::<_, TopicRow>(
        r#"
        SELECT cid, main_pid
        FROM topics
        WHERE tid = $1
        "#,
    )
    .bind(tid)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update_meta(
    tx: &mut Transaction<'_, Postgres>,
    tid: i64,
    title: Option<&str>,
    thumb: Option<&str>,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        UPDATE topics
        SET
            title = COALESCE($2, title),
            thumb = COALESCE($3, thumb)
        WHERE tid = $1
        "#,
    )
    .bind(tid)
    .bind(title)
    .bind(thumb)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn replace_tags(
    tx: &mut Transaction<'_, Postgres>,
    tid: i64,
    tags: &[String],
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        DELETE FROM topic_tags
        WHERE tid = $1
        "#,
    )
    .bind(tid)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO topic_tags (tid, tag)
        SELECT DISTINCT $1::bigint, tag
        FROM UNNEST($2::text[]) AS tag
        "#,
    )
    .bind(tid)
    .bind(tags)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
