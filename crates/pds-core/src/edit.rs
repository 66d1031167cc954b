//! Inline edit cycle for a single plan row.
//!
//! ```text
//! Viewing --edit(id)-------> Editing
//! Editing --save(id, form)-> Viewing
//! Editing --cancel(id)-----> Viewing
//! ```
//!
//! The state is never stored. Each transition reloads the plan and the value
//! list and returns the row representation for its target state.

use sqlx::PgPool;
use tracing::{debug, info};

use pds_db::models::{Aim, Plan, PlanWithValue};
use pds_db::queries::{aims, plans};

use crate::error::{ServiceError, ServiceResult};
use crate::records::PlanDraft;

/// A plan row in one of the two states, with everything needed to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanRow {
    /// Read-only row; the value reference is already resolved to a name.
    Viewing(PlanWithValue),
    /// Editable row; `values` populates the value selector.
    Editing { plan: Plan, values: Vec<Aim> },
}

impl PlanRow {
    pub fn plan_id(&self) -> i64 {
        match self {
            Self::Viewing(plan) => plan.id,
            Self::Editing { plan, .. } => plan.id,
        }
    }
}

/// Resolve a plan's value reference against the full value list. A dangling
/// reference resolves to `None`, rendered as the placeholder label.
pub fn resolve_value(plan: Plan, values: &[Aim]) -> PlanWithValue {
    let value_name = values
        .iter()
        .find(|v| v.id == plan.value_id)
        .map(|v| v.name.clone());
    PlanWithValue {
        id: plan.id,
        name: plan.name,
        description: plan.description,
        resources_required: plan.resources_required,
        value_id: plan.value_id,
        value_name,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlanEditor<'a> {
    pool: &'a PgPool,
}

impl<'a> PlanEditor<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// `Viewing -> Editing`. Reads only.
    pub async fn edit(&self, id: i64) -> ServiceResult<PlanRow> {
        let plan = plans::get_plan(self.pool, id).await?;
        let values = aims::list_aims(self.pool).await?;
        debug!(plan_id = id, options = values.len(), "plan row entering edit");
        Ok(PlanRow::Editing { plan, values })
    }

    /// `Editing -> Viewing`, persisting the submitted fields.
    ///
    /// The value reference must parse and name an existing value; otherwise
    /// nothing is written. The update itself is one statement.
    pub async fn save(&self, id: i64, draft: &PlanDraft) -> ServiceResult<PlanRow> {
        let fields = draft.validate()?;

        match aims::get_aim(self.pool, fields.value_id).await {
            Ok(_) => {}
            Err(err) if err.is_not_found() => {
                return Err(ServiceError::validation(format!(
                    "value ID refers to unknown value {}",
                    fields.value_id
                )));
            }
            Err(err) => return Err(err.into()),
        }

        plans::update_plan(self.pool, id, &fields).await?;
        info!(plan_id = id, value_id = fields.value_id, "plan updated");

        self.viewing(id).await
    }

    /// `Editing -> Viewing`, discarding unsaved edits.
    pub async fn cancel(&self, id: i64) -> ServiceResult<PlanRow> {
        debug!(plan_id = id, "plan edit cancelled");
        self.viewing(id).await
    }

    async fn viewing(&self, id: i64) -> ServiceResult<PlanRow> {
        let plan = plans::get_plan(self.pool, id).await?;
        let values = aims::list_aims(self.pool).await?;
        Ok(PlanRow::Viewing(resolve_value(plan, &values)))
    }
}
