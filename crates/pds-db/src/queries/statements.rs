//! Database query functions for the `statements` table.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::Statement;

pub async fn insert_statement(pool: &PgPool, content: &str, priority: i32) -> StoreResult<Statement> {
    let statement = sqlx::query_as::<_, Statement>(
        "INSERT INTO statements (content, priority) VALUES ($1, $2) RETURNING *",
    )
    .bind(content)
    .bind(priority)
    .fetch_one(pool)
    .await?;

    Ok(statement)
}

pub async fn get_statement(pool: &PgPool, id: i64) -> StoreResult<Statement> {
    sqlx::query_as::<_, Statement>("SELECT * FROM statements WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found("statement", id))
}

/// List statements in id order.
pub async fn list_statements(pool: &PgPool) -> StoreResult<Vec<Statement>> {
    let statements = sqlx::query_as::<_, Statement>("SELECT * FROM statements ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(statements)
}

pub async fn delete_statement(pool: &PgPool, id: i64) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM statements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("statement", id));
    }

    Ok(())
}
