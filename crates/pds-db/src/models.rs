use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Label shown wherever a soft reference (plan → aim, behaviour → aim)
/// points at a row that no longer exists.
pub const MISSING_REFERENCE_LABEL: &str = "Unknown";

/// Resolve the display name of a soft reference.
pub fn reference_label(name: Option<&str>) -> &str {
    name.unwrap_or(MISSING_REFERENCE_LABEL)
}

// ---------------------------------------------------------------------------
// Values / aims
// ---------------------------------------------------------------------------

/// A node in the value/aim graph.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Aim {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Aim {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// An aim together with the names of its direct parents, as listed on the
/// values page.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AimSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Comma-separated parent names in parent id order; empty for roots.
    pub parent_names: String,
}

/// A directed `(child, parent)` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow)]
pub struct AimEdge {
    pub child_id: i64,
    pub parent_id: i64,
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// A plan row exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub resources_required: String,
    pub value_id: i64,
}

/// A plan joined with the name of the aim it references. `value_name` is
/// `None` when the aim has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PlanWithValue {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub resources_required: String,
    pub value_id: i64,
    pub value_name: Option<String>,
}

impl PlanWithValue {
    pub fn value_label(&self) -> &str {
        reference_label(self.value_name.as_deref())
    }
}

/// Editable plan fields, shared by insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFields {
    pub name: String,
    pub description: String,
    pub resources_required: String,
    pub value_id: i64,
}

// ---------------------------------------------------------------------------
// Journals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Journal {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub journal_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Journal {
    pub fn content_text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Statement {
    pub id: i64,
    pub content: String,
    pub priority: i32,
}

// ---------------------------------------------------------------------------
// Behaviours
// ---------------------------------------------------------------------------

/// A behaviour joined with the name of the aim it conflicts with.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Behaviour {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub mark: String,
    pub conflicting_aim_id: i64,
    pub conflicting_aim_name: Option<String>,
}

impl Behaviour {
    pub fn conflicting_aim_label(&self) -> &str {
        reference_label(self.conflicting_aim_name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBehaviour {
    pub name: String,
    pub description: String,
    pub mark: String,
    pub conflicting_aim_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_label_falls_back() {
        assert_eq!(reference_label(Some("Health")), "Health");
        assert_eq!(reference_label(None), MISSING_REFERENCE_LABEL);
    }

    #[test]
    fn plan_value_label() {
        let mut plan = PlanWithValue {
            id: 1,
            name: "Run".into(),
            description: String::new(),
            resources_required: String::new(),
            value_id: 9,
            value_name: Some("Health".into()),
        };
        assert_eq!(plan.value_label(), "Health");
        plan.value_name = None;
        assert_eq!(plan.value_label(), "Unknown");
    }
}
