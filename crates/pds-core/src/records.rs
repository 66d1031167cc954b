//! Service operations for the record kinds outside the value graph.
//!
//! Each takes already-decoded form text, validates it, and runs a single
//! store statement (plus a read-back where the caller needs the joined row).

use sqlx::PgPool;
use tracing::info;

use pds_db::models::{Behaviour, Journal, NewBehaviour, PlanFields, PlanWithValue, Statement};
use pds_db::queries::{aims, behaviours, journals, plans, statements};

use crate::error::{ServiceError, ServiceResult, parse_id, require};

/// Confirm that a soft reference points at an existing value at write time.
async fn ensure_value_exists(pool: &PgPool, field: &str, id: i64) -> ServiceResult<()> {
    match aims::get_aim(pool, id).await {
        Ok(_) => Ok(()),
        Err(err) if err.is_not_found() => Err(ServiceError::validation(format!(
            "{field} refers to unknown value {id}"
        ))),
        Err(err) => Err(err.into()),
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Submitted plan fields; `value_ref` is the raw value id text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanDraft {
    pub name: String,
    pub description: String,
    pub resources_required: String,
    pub value_ref: String,
}

impl PlanDraft {
    /// Check required fields and parse the value reference.
    pub fn validate(&self) -> ServiceResult<PlanFields> {
        require("name", &self.name)?;
        let value_id = parse_id("value ID", &self.value_ref)?;
        Ok(PlanFields {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            resources_required: self.resources_required.trim().to_owned(),
            value_id,
        })
    }
}

pub async fn create_plan(pool: &PgPool, draft: &PlanDraft) -> ServiceResult<PlanWithValue> {
    let fields = draft.validate()?;
    ensure_value_exists(pool, "value ID", fields.value_id).await?;

    let plan = plans::insert_plan(pool, &fields).await?;
    info!(plan_id = plan.id, value_id = plan.value_id, "plan created");

    Ok(plans::get_plan_with_value(pool, plan.id).await?)
}

pub async fn list_plans(pool: &PgPool) -> ServiceResult<Vec<PlanWithValue>> {
    Ok(plans::list_plans(pool).await?)
}

pub async fn delete_plan(pool: &PgPool, id: i64) -> ServiceResult<()> {
    plans::delete_plan(pool, id).await?;
    info!(plan_id = id, "plan deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Journals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalDraft {
    pub title: String,
    pub content: String,
    pub journal_type: String,
}

pub async fn create_journal(pool: &PgPool, draft: &JournalDraft) -> ServiceResult<Journal> {
    if draft.title.trim().is_empty() || draft.journal_type.trim().is_empty() {
        return Err(ServiceError::validation(
            "title and journal type are required",
        ));
    }
    let content = Some(draft.content.as_str()).filter(|c| !c.is_empty());

    let journal = journals::insert_journal(
        pool,
        draft.title.trim(),
        content,
        draft.journal_type.trim(),
    )
    .await?;
    info!(journal_id = journal.id, journal_type = %journal.journal_type, "journal created");

    Ok(journal)
}

pub async fn list_journals(pool: &PgPool, journal_type: Option<&str>) -> ServiceResult<Vec<Journal>> {
    Ok(journals::list_journals(pool, journal_type).await?)
}

pub async fn get_journal(pool: &PgPool, id: i64) -> ServiceResult<Journal> {
    Ok(journals::get_journal(pool, id).await?)
}

pub async fn delete_journal(pool: &PgPool, id: i64) -> ServiceResult<()> {
    journals::delete_journal(pool, id).await?;
    info!(journal_id = id, "journal deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementDraft {
    pub content: String,
    /// Raw priority text; anything that is not an integer means 0.
    pub priority: String,
}

pub async fn create_statement(pool: &PgPool, draft: &StatementDraft) -> ServiceResult<Statement> {
    require("content", &draft.content)?;
    let priority = draft.priority.trim().parse::<i32>().unwrap_or(0);

    let statement = statements::insert_statement(pool, draft.content.trim(), priority).await?;
    info!(statement_id = statement.id, priority, "statement created");

    Ok(statement)
}

pub async fn list_statements(pool: &PgPool) -> ServiceResult<Vec<Statement>> {
    Ok(statements::list_statements(pool).await?)
}

pub async fn delete_statement(pool: &PgPool, id: i64) -> ServiceResult<()> {
    statements::delete_statement(pool, id).await?;
    info!(statement_id = id, "statement deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Behaviours
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BehaviourDraft {
    pub name: String,
    pub description: String,
    pub mark: String,
    pub conflicting_aim_ref: String,
}

pub async fn create_behaviour(pool: &PgPool, draft: &BehaviourDraft) -> ServiceResult<Behaviour> {
    require("name", &draft.name)?;
    let conflicting_aim_id = parse_id("conflicting aim ID", &draft.conflicting_aim_ref)?;
    ensure_value_exists(pool, "conflicting aim ID", conflicting_aim_id).await?;

    let new = NewBehaviour {
        name: draft.name.trim().to_owned(),
        description: draft.description.trim().to_owned(),
        mark: draft.mark.trim().to_owned(),
        conflicting_aim_id,
    };
    let behaviour = behaviours::insert_behaviour(pool, &new).await?;
    info!(behaviour_id = behaviour.id, conflicting_aim_id, "behaviour created");

    Ok(behaviour)
}

pub async fn list_behaviours(pool: &PgPool) -> ServiceResult<Vec<Behaviour>> {
    Ok(behaviours::list_behaviours(pool).await?)
}

pub async fn delete_behaviour(pool: &PgPool, id: i64) -> ServiceResult<()> {
    behaviours::delete_behaviour(pool, id).await?;
    info!(behaviour_id = id, "behaviour deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_draft_parses_value_ref() {
        let draft = PlanDraft {
            name: " Run ".into(),
            description: "5k".into(),
            resources_required: "shoes".into(),
            value_ref: "12".into(),
        };
        let fields = draft.validate().unwrap();
        assert_eq!(fields.name, "Run");
        assert_eq!(fields.value_id, 12);
    }

    #[test]
    fn plan_draft_rejects_unparseable_value_ref() {
        let draft = PlanDraft {
            name: "Run".into(),
            value_ref: "health".into(),
            ..PlanDraft::default()
        };
        let err = draft.validate().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(err.to_string().contains("value ID"));
    }

    #[test]
    fn plan_draft_requires_name() {
        let draft = PlanDraft {
            value_ref: "1".into(),
            ..PlanDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err().to_string(), "name is required");
    }
}
