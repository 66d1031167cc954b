//! Database query functions for the `behaviours` table.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::{Behaviour, NewBehaviour};

const BEHAVIOUR_WITH_AIM: &str = "SELECT b.id, b.name, b.description, b.mark, b.conflicting_aim_id, \
                                         a.name AS conflicting_aim_name \
                                  FROM behaviours b \
                                  LEFT JOIN aims a ON a.id = b.conflicting_aim_id";

/// Insert a behaviour and return it with its conflicting aim name resolved.
pub async fn insert_behaviour(pool: &PgPool, new: &NewBehaviour) -> StoreResult<Behaviour> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO behaviours (name, description, mark, conflicting_aim_id) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(&new.name)
    .bind(&new.description)
    .bind(&new.mark)
    .bind(new.conflicting_aim_id)
    .fetch_one(pool)
    .await?;

    get_behaviour(pool, id).await
}

pub async fn get_behaviour(pool: &PgPool, id: i64) -> StoreResult<Behaviour> {
    let query = format!("{BEHAVIOUR_WITH_AIM} WHERE b.id = $1");
    sqlx::query_as::<_, Behaviour>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found("behaviour", id))
}

/// List behaviours in id order.
pub async fn list_behaviours(pool: &PgPool) -> StoreResult<Vec<Behaviour>> {
    let query = format!("{BEHAVIOUR_WITH_AIM} ORDER BY b.id");
    let behaviours = sqlx::query_as::<_, Behaviour>(&query)
        .fetch_all(pool)
        .await?;

    Ok(behaviours)
}

pub async fn delete_behaviour(pool: &PgPool, id: i64) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM behaviours WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("behaviour", id));
    }

    Ok(())
}
