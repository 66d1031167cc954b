//! Outcome rendering.
//!
//! Every handled request ends in an [`Outcome`]. [`dispatch`] turns it into
//! a [`Rendered`] response body according to the request's [`RenderMode`]:
//! full documents for plain navigation, bare fragments for partial swaps.
//! Nothing here touches the store.

use pds_db::models::{Aim, AimSummary, Behaviour, Journal, PlanWithValue, Statement};

use crate::edit::PlanRow;
use crate::graph::Related;
use crate::resource::Resource;
use crate::views::{self, behaviours, journals, plans, statements, values};

/// Request header whose value `true` asks for a fragment.
pub const MARKER_HEADER: &str = "HX-Request";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Full,
    Fragment,
}

impl RenderMode {
    /// Mode for a request carrying `marker` as its [`MARKER_HEADER`] value.
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some(value) if value.trim() == "true" => Self::Fragment,
            _ => Self::Full,
        }
    }
}

/// Loaded rows for a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Journals {
        journals: Vec<Journal>,
        filter: Option<String>,
    },
    /// `values` feeds the creation form's selector.
    Plans {
        plans: Vec<PlanWithValue>,
        values: Vec<Aim>,
    },
    Statements(Vec<Statement>),
    Behaviours {
        behaviours: Vec<Behaviour>,
        values: Vec<Aim>,
    },
    Values(Vec<AimSummary>),
}

impl Listing {
    pub fn resource(&self) -> Resource {
        match self {
            Self::Journals { .. } => Resource::Journals,
            Self::Plans { .. } => Resource::Plans,
            Self::Statements(_) => Resource::Statements,
            Self::Behaviours { .. } => Resource::Behaviours,
            Self::Values(_) => Resource::Values,
        }
    }
}

/// A freshly created record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Journal(Journal),
    Plan(PlanWithValue),
    Statement(Statement),
    Behaviour(Behaviour),
    Value(AimSummary),
}

impl Record {
    pub fn resource(&self) -> Resource {
        match self {
            Self::Journal(_) => Resource::Journals,
            Self::Plan(_) => Resource::Plans,
            Self::Statement(_) => Resource::Statements,
            Self::Behaviour(_) => Resource::Behaviours,
            Self::Value(_) => Resource::Values,
        }
    }

    fn row(&self) -> String {
        match self {
            Self::Journal(journal) => journals::journal_entry(journal),
            Self::Plan(plan) => plans::plan_row(plan),
            Self::Statement(statement) => statements::statement_row(statement),
            Self::Behaviour(behaviour) => behaviours::behaviour_row(behaviour),
            Self::Value(value) => values::value_row(value),
        }
    }
}

/// What a handled request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Home,
    Listing(Listing),
    Related(Related),
    Created(Record),
    Deleted(Resource),
    PlanRow(PlanRow),
    /// A record was confirmed to exist; the client goes back to its listing.
    Shown(Resource),
}

/// Response body chosen by [`dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Document(String),
    Fragment(String),
    Empty,
    /// `303 See Other` to the given path.
    Redirect(&'static str),
}

pub fn dispatch(outcome: &Outcome, mode: RenderMode) -> Rendered {
    match (outcome, mode) {
        (Outcome::Home, _) => {
            Rendered::Document(views::page(Resource::Home.title(), Resource::Home, &views::home()))
        }

        (Outcome::Listing(listing), RenderMode::Full) => {
            let resource = listing.resource();
            Rendered::Document(views::page(resource.title(), resource, &listing_body(listing)))
        }
        (Outcome::Listing(listing), RenderMode::Fragment) => {
            Rendered::Fragment(listing_fragment(listing))
        }

        (Outcome::Related(related), RenderMode::Full) => {
            let title = format!("{} of {}", related.relation.label(), related.node.name);
            let body = format!(
                "{}<p><a href=\"/values\">All values</a></p>",
                values::related_table(related)
            );
            Rendered::Document(views::page(&title, Resource::Values, &body))
        }
        (Outcome::Related(related), RenderMode::Fragment) => {
            Rendered::Fragment(values::related_table(related))
        }

        (Outcome::Created(record), RenderMode::Full) => {
            Rendered::Redirect(record.resource().listing_path())
        }
        (Outcome::Created(record), RenderMode::Fragment) => Rendered::Fragment(record.row()),

        (Outcome::Deleted(resource), RenderMode::Full) => Rendered::Redirect(resource.listing_path()),
        (Outcome::Deleted(_), RenderMode::Fragment) => Rendered::Empty,

        (Outcome::PlanRow(row), RenderMode::Full) => Rendered::Document(views::page(
            Resource::Plans.title(),
            Resource::Plans,
            &plans::plan_row_body(row),
        )),
        (Outcome::PlanRow(row), RenderMode::Fragment) => Rendered::Fragment(plans::render_row(row)),

        (Outcome::Shown(resource), _) => Rendered::Redirect(resource.listing_path()),
    }
}

fn listing_body(listing: &Listing) -> String {
    match listing {
        Listing::Journals { journals, filter } => journals::journals_body(journals, filter.as_deref()),
        Listing::Plans { plans, values } => plans::plans_body(plans, values),
        Listing::Statements(rows) => statements::statements_body(rows),
        Listing::Behaviours { behaviours, values } => behaviours::behaviours_body(behaviours, values),
        Listing::Values(rows) => values::values_body(rows),
    }
}

fn listing_fragment(listing: &Listing) -> String {
    match listing {
        Listing::Journals { journals, .. } => journals::journal_list(journals),
        Listing::Plans { plans, .. } => plans::plans_table(plans),
        Listing::Statements(rows) => statements::statements_table(rows),
        Listing::Behaviours { behaviours, .. } => behaviours::behaviours_table(behaviours),
        Listing::Values(rows) => values::values_table(rows),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::edit::resolve_value;
    use crate::graph::Relation;
    use pds_db::models::Plan;

    fn summaries() -> Vec<AimSummary> {
        ["Health", "Career", "Family"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| AimSummary {
                id: i as i64 + 1,
                name: name.into(),
                description: None,
                parent_names: String::new(),
            })
            .collect()
    }

    fn aim(id: i64, name: &str) -> Aim {
        Aim {
            id,
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn body(rendered: Rendered) -> String {
        match rendered {
            Rendered::Document(html) | Rendered::Fragment(html) => html,
            other => panic!("expected markup, got {other:?}"),
        }
    }

    #[test]
    fn marker_selects_mode() {
        assert_eq!(RenderMode::from_marker(Some("true")), RenderMode::Fragment);
        assert_eq!(RenderMode::from_marker(Some("false")), RenderMode::Full);
        assert_eq!(RenderMode::from_marker(Some("")), RenderMode::Full);
        assert_eq!(RenderMode::from_marker(None), RenderMode::Full);
    }

    #[test]
    fn listing_full_is_a_document_with_form() {
        let outcome = Outcome::Listing(Listing::Values(summaries()));
        let rendered = dispatch(&outcome, RenderMode::Full);
        assert!(matches!(rendered, Rendered::Document(_)));
        let html = body(rendered);
        assert!(html.contains("<html"));
        assert!(html.contains("<form"));
        for name in ["Health", "Career", "Family"] {
            assert!(html.contains(name));
        }
    }

    #[test]
    fn listing_fragment_is_table_only() {
        let outcome = Outcome::Listing(Listing::Values(summaries()));
        let rendered = dispatch(&outcome, RenderMode::Fragment);
        assert!(matches!(rendered, Rendered::Fragment(_)));
        let html = body(rendered);
        assert!(!html.contains("<html"));
        assert!(!html.contains("<form"));
        assert!(html.contains("Career"));
    }

    #[test]
    fn created_redirects_or_returns_row() {
        let record = Record::Statement(Statement {
            id: 3,
            content: "Be kind".into(),
            priority: 1,
        });
        let outcome = Outcome::Created(record);
        assert_eq!(
            dispatch(&outcome, RenderMode::Full),
            Rendered::Redirect("/statements")
        );
        let html = body(dispatch(&outcome, RenderMode::Fragment));
        assert!(html.starts_with("<tr id=\"statement-row-3\">"));
    }

    #[test]
    fn deleted_redirects_or_empties() {
        let outcome = Outcome::Deleted(Resource::Behaviours);
        assert_eq!(
            dispatch(&outcome, RenderMode::Full),
            Rendered::Redirect("/behaviours")
        );
        assert_eq!(dispatch(&outcome, RenderMode::Fragment), Rendered::Empty);
    }

    #[test]
    fn shown_always_redirects() {
        let outcome = Outcome::Shown(Resource::Journals);
        assert_eq!(dispatch(&outcome, RenderMode::Full), Rendered::Redirect("/journals"));
        assert_eq!(
            dispatch(&outcome, RenderMode::Fragment),
            Rendered::Redirect("/journals")
        );
    }

    #[test]
    fn plan_row_matches_listing_row() {
        let plan = Plan {
            id: 1,
            name: "Run".into(),
            description: String::new(),
            resources_required: String::new(),
            value_id: 1,
        };
        let values = vec![aim(1, "Health")];
        let viewing = resolve_value(plan, &values);

        let row = body(dispatch(
            &Outcome::PlanRow(PlanRow::Viewing(viewing.clone())),
            RenderMode::Fragment,
        ));
        let listing = body(dispatch(
            &Outcome::Listing(Listing::Plans {
                plans: vec![viewing],
                values,
            }),
            RenderMode::Fragment,
        ));
        assert!(listing.contains(&row));
    }

    #[test]
    fn plan_row_full_embeds_row_in_page() {
        let plan = Plan {
            id: 2,
            name: "Read".into(),
            description: String::new(),
            resources_required: String::new(),
            value_id: 1,
        };
        let outcome = Outcome::PlanRow(PlanRow::Editing {
            plan,
            values: vec![aim(1, "Health")],
        });
        let html = body(dispatch(&outcome, RenderMode::Full));
        assert!(html.contains("<html"));
        assert!(html.contains("<tr id=\"plan-row-2\" class=\"editing\">"));
    }

    #[test]
    fn related_fragment_has_no_layout() {
        let outcome = Outcome::Related(Related {
            relation: Relation::Parents,
            node: aim(3, "Cook"),
            nodes: vec![aim(1, "Health")],
            ancestors: vec![aim(1, "Health")],
        });
        let html = body(dispatch(&outcome, RenderMode::Fragment));
        assert!(html.contains("Parents of Cook"));
        assert!(!html.contains("<html"));
        assert!(body(dispatch(&outcome, RenderMode::Full)).contains("<html"));
    }
}
