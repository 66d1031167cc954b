//! Database query functions for the `journals` table.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::Journal;

/// Insert a new journal entry. `created_at` and `updated_at` default to now.
pub async fn insert_journal(
    pool: &PgPool,
    title: &str,
    content: Option<&str>,
    journal_type: &str,
) -> StoreResult<Journal> {
    let journal = sqlx::query_as::<_, Journal>(
        "INSERT INTO journals (title, content, journal_type) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(title)
    .bind(content)
    .bind(journal_type)
    .fetch_one(pool)
    .await?;

    Ok(journal)
}

/// Fetch a journal entry by its ID.
pub async fn get_journal(pool: &PgPool, id: i64) -> StoreResult<Journal> {
    sqlx::query_as::<_, Journal>("SELECT * FROM journals WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found("journal", id))
}

/// List journal entries, newest first, optionally restricted to one
/// `journal_type` (exact match).
pub async fn list_journals(pool: &PgPool, journal_type: Option<&str>) -> StoreResult<Vec<Journal>> {
    let journals = match journal_type {
        Some(kind) => {
            sqlx::query_as::<_, Journal>(
                "SELECT * FROM journals WHERE journal_type = $1 \
                 ORDER BY created_at DESC, id DESC",
            )
            .bind(kind)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Journal>("SELECT * FROM journals ORDER BY created_at DESC, id DESC")
                .fetch_all(pool)
                .await?
        }
    };

    Ok(journals)
}

/// Replace the title, content and type of an entry and bump `updated_at`.
pub async fn update_journal(
    pool: &PgPool,
    id: i64,
    title: &str,
    content: Option<&str>,
    journal_type: &str,
) -> StoreResult<Journal> {
    sqlx::query_as::<_, Journal>(
        "UPDATE journals \
         SET title = $1, content = $2, journal_type = $3, updated_at = now() \
         WHERE id = $4 \
         RETURNING *",
    )
    .bind(title)
    .bind(content)
    .bind(journal_type)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::not_found("journal", id))
}

/// Delete a journal entry.
pub async fn delete_journal(pool: &PgPool, id: i64) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM journals WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("journal", id));
    }

    Ok(())
}
