//! Database query functions for the `aims` and `aim_parents` tables.
//!
//! Reads take the pool. Writes take a connection so the graph manager can
//! run them inside one transaction; none of them opens a transaction itself.

use sqlx::{PgConnection, PgPool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::models::{Aim, AimEdge, AimSummary};

const AIM_COLUMNS: &str = "a.id, a.name, a.description, a.created_at";

/// Insert a node. Returns the row with its store-assigned id.
pub async fn insert_aim(
    conn: &mut PgConnection,
    name: &str,
    description: Option<&str>,
) -> StoreResult<Aim> {
    let aim = sqlx::query_as::<_, Aim>(
        "INSERT INTO aims (name, description) VALUES ($1, $2) \
         RETURNING id, name, description, created_at",
    )
    .bind(name)
    .bind(description)
    .fetch_one(conn)
    .await?;

    Ok(aim)
}

/// Insert a single `(child, parent)` edge.
pub async fn insert_edge(conn: &mut PgConnection, child_id: i64, parent_id: i64) -> StoreResult<()> {
    sqlx::query("INSERT INTO aim_parents (child_id, parent_id) VALUES ($1, $2)")
        .bind(child_id)
        .bind(parent_id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Return which of `ids` exist, taking a share lock on each so they cannot
/// be deleted before the surrounding transaction commits.
pub async fn lock_existing_ids(conn: &mut PgConnection, ids: &[i64]) -> StoreResult<Vec<i64>> {
    let found: Vec<i64> =
        sqlx::query_scalar("SELECT id FROM aims WHERE id = ANY($1) ORDER BY id FOR SHARE")
            .bind(ids)
            .fetch_all(conn)
            .await?;

    Ok(found)
}

/// Take an exclusive row lock on a node for the rest of the transaction.
///
/// Concurrent deletes of the same node queue behind this lock; the loser
/// finds no row and gets [`StoreError::NotFound`].
pub async fn lock_aim(conn: &mut PgConnection, id: i64) -> StoreResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM aims WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(StoreError::not_found("value", id)),
    }
}

/// Delete every edge in which `id` is the child or the parent. Returns the
/// number of edges removed.
pub async fn delete_edges_touching(conn: &mut PgConnection, id: i64) -> StoreResult<u64> {
    let result = sqlx::query("DELETE FROM aim_parents WHERE child_id = $1 OR parent_id = $1")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Delete the node row itself.
pub async fn delete_aim(conn: &mut PgConnection, id: i64) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM aims WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("value", id));
    }

    Ok(())
}

/// Fetch one node.
pub async fn get_aim(pool: &PgPool, id: i64) -> StoreResult<Aim> {
    let query = format!("SELECT {AIM_COLUMNS} FROM aims a WHERE a.id = $1");
    sqlx::query_as::<_, Aim>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found("value", id))
}

/// List every node in id order.
pub async fn list_aims(pool: &PgPool) -> StoreResult<Vec<Aim>> {
    let query = format!("SELECT {AIM_COLUMNS} FROM aims a ORDER BY a.id");
    let aims = sqlx::query_as::<_, Aim>(&query).fetch_all(pool).await?;

    debug!(count = aims.len(), "listed aims");
    Ok(aims)
}

/// List every node with its parents' names joined by `", "`.
pub async fn list_aim_summaries(pool: &PgPool) -> StoreResult<Vec<AimSummary>> {
    let aims = sqlx::query_as::<_, AimSummary>(
        "SELECT a.id, a.name, a.description, \
                COALESCE(string_agg(p.name, ', ' ORDER BY p.id), '') AS parent_names \
         FROM aims a \
         LEFT JOIN aim_parents e ON e.child_id = a.id \
         LEFT JOIN aims p ON p.id = e.parent_id \
         GROUP BY a.id \
         ORDER BY a.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(aims)
}

/// Nodes whose edges record `id` as their parent.
pub async fn children_of(pool: &PgPool, id: i64) -> StoreResult<Vec<Aim>> {
    let query = format!(
        "SELECT {AIM_COLUMNS} FROM aims a \
         JOIN aim_parents e ON a.id = e.child_id \
         WHERE e.parent_id = $1 \
         ORDER BY a.id"
    );
    let aims = sqlx::query_as::<_, Aim>(&query)
        .bind(id)
        .fetch_all(pool)
        .await?;

    Ok(aims)
}

/// Nodes whose edges record `id` as their child.
pub async fn parents_of(pool: &PgPool, id: i64) -> StoreResult<Vec<Aim>> {
    let query = format!(
        "SELECT {AIM_COLUMNS} FROM aims a \
         JOIN aim_parents e ON a.id = e.parent_id \
         WHERE e.child_id = $1 \
         ORDER BY a.id"
    );
    let aims = sqlx::query_as::<_, Aim>(&query)
        .bind(id)
        .fetch_all(pool)
        .await?;

    Ok(aims)
}

/// Every transitive parent of `id`. `UNION` (not `UNION ALL`) stops the
/// recursion even if the edge set were to contain a cycle.
pub async fn ancestors_of(pool: &PgPool, id: i64) -> StoreResult<Vec<Aim>> {
    let query = format!(
        "WITH RECURSIVE ancestry(id) AS ( \
             SELECT parent_id FROM aim_parents WHERE child_id = $1 \
             UNION \
             SELECT e.parent_id FROM aim_parents e JOIN ancestry ON e.child_id = ancestry.id \
         ) \
         SELECT {AIM_COLUMNS} FROM aims a \
         JOIN ancestry ON a.id = ancestry.id \
         ORDER BY a.id"
    );
    let aims = sqlx::query_as::<_, Aim>(&query)
        .bind(id)
        .fetch_all(pool)
        .await?;

    Ok(aims)
}

/// Every edge in the graph, ordered by `(child_id, parent_id)`.
pub async fn list_edges(pool: &PgPool) -> StoreResult<Vec<AimEdge>> {
    let edges = sqlx::query_as::<_, AimEdge>(
        "SELECT child_id, parent_id FROM aim_parents ORDER BY child_id, parent_id",
    )
    .fetch_all(pool)
    .await?;

    Ok(edges)
}
