/*
 * Responsibility
 * - category_privileges lookup
 * - a row with uid NULL grants the privilege to every registered user
 */
use sqlx::PgPool;

use crate::repos::error::RepoError;

pub async fn has(pool: &PgPool, cid: i64, privilege: &str, uid: i64) -> Result<bool, RepoError> {
    let granted: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM category_privileges
            WHERE cid = $1
              AND privilege = $2
              AND (uid = $3 OR uid IS NULL)
        )
        "#,
    )
    .bind(cid)
    .bind(privilege)
    .bind(uid)
    .fetch_one(pool)
    .await?;

    Ok(granted)
}
