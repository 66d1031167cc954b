//! Database query functions for the `plans` table.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::{Plan, PlanFields, PlanWithValue};

const PLAN_WITH_VALUE: &str = "SELECT p.id, p.name, p.description, p.resources_required, \
                                      p.value_id, a.name AS value_name \
                               FROM plans p \
                               LEFT JOIN aims a ON a.id = p.value_id";

/// Insert a new plan row.
pub async fn insert_plan(pool: &PgPool, fields: &PlanFields) -> StoreResult<Plan> {
    let plan = sqlx::query_as::<_, Plan>(
        "INSERT INTO plans (name, description, resources_required, value_id) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(&fields.resources_required)
    .bind(fields.value_id)
    .fetch_one(pool)
    .await?;

    Ok(plan)
}

/// Fetch a plan by its ID.
pub async fn get_plan(pool: &PgPool, id: i64) -> StoreResult<Plan> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found("plan", id))
}

/// Fetch a plan with its value name resolved.
pub async fn get_plan_with_value(pool: &PgPool, id: i64) -> StoreResult<PlanWithValue> {
    let query = format!("{PLAN_WITH_VALUE} WHERE p.id = $1");
    sqlx::query_as::<_, PlanWithValue>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found("plan", id))
}

/// List all plans in id order with their value names resolved.
pub async fn list_plans(pool: &PgPool) -> StoreResult<Vec<PlanWithValue>> {
    let query = format!("{PLAN_WITH_VALUE} ORDER BY p.id");
    let plans = sqlx::query_as::<_, PlanWithValue>(&query)
        .fetch_all(pool)
        .await?;

    Ok(plans)
}

/// Overwrite every editable field of a plan in a single statement.
pub async fn update_plan(pool: &PgPool, id: i64, fields: &PlanFields) -> StoreResult<Plan> {
    sqlx::query_as::<_, Plan>(
        "UPDATE plans \
         SET name = $1, description = $2, resources_required = $3, value_id = $4 \
         WHERE id = $5 \
         RETURNING *",
    )
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(&fields.resources_required)
    .bind(fields.value_id)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::not_found("plan", id))
}

/// Delete a plan.
pub async fn delete_plan(pool: &PgPool, id: i64) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM plans WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("plan", id));
    }

    Ok(())
}
