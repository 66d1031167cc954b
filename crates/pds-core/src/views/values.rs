use std::fmt::Write as _;

use pds_db::models::{Aim, AimSummary};

use super::{escape, value_options};
use crate::graph::Related;

/// One row of the values table.
pub fn value_row(value: &AimSummary) -> String {
    format!(
        "<tr id=\"value-row-{id}\">\
<td>{id}</td>\
<td>{name}</td>\
<td>{description}</td>\
<td>{parents}</td>\
<td>\
<a href=\"/values/children?valueID={id}\" hx-get=\"/values/children?valueID={id}\" hx-target=\"#value-related\">Children</a> \
<a href=\"/values/parents?valueID={id}\" hx-get=\"/values/parents?valueID={id}\" hx-target=\"#value-related\">Parents</a> \
<form method=\"post\" action=\"/values/delete\" hx-delete=\"/values?valueID={id}\" \
hx-confirm=\"Delete this value and all of its relationships?\" \
hx-target=\"#value-row-{id}\" hx-swap=\"outerHTML\">\
<input type=\"hidden\" name=\"valueID\" value=\"{id}\">\
<button type=\"submit\">Delete</button>\
</form>\
</td>\
</tr>",
        id = value.id,
        name = escape(&value.name),
        description = escape(value.description.as_deref().unwrap_or("")),
        parents = escape(&value.parent_names),
    )
}

/// The values table. This is the whole fragment-mode response for
/// `GET /values`.
pub fn values_table(values: &[AimSummary]) -> String {
    let mut rows = String::new();
    if values.is_empty() {
        rows.push_str("<tr><td colspan=\"5\">No values yet.</td></tr>");
    }
    for value in values {
        rows.push_str(&value_row(value));
    }
    format!(
        "<table id=\"values-list\">\
<thead><tr><th>ID</th><th>Name</th><th>Description</th><th>Parents</th><th></th></tr></thead>\
<tbody id=\"values-body\">{rows}</tbody>\
</table>"
    )
}

/// Creation form; every existing value can be picked as a parent.
pub fn value_form(values: &[AimSummary]) -> String {
    let options = value_options(values.iter().map(|v| (v.id, v.name.as_str())), None);
    format!(
        "<form method=\"post\" action=\"/values\" \
hx-post=\"/values\" hx-target=\"#values-body\" hx-swap=\"beforeend\">\
<label>Name <input type=\"text\" name=\"name\" required></label>\
<label>Description <textarea name=\"description\"></textarea></label>\
<label>Parents <select name=\"parents\" multiple>{options}</select></label>\
<button type=\"submit\">Add value</button>\
</form>"
    )
}

/// Full-page body for the values listing.
pub fn values_body(values: &[AimSummary]) -> String {
    format!(
        "{form}{table}<section id=\"value-related\"></section>",
        form = value_form(values),
        table = values_table(values),
    )
}

/// Table of a node's children or parents.
pub fn related_table(related: &Related) -> String {
    let mut rows = String::new();
    if related.nodes.is_empty() {
        let _ = write!(
            rows,
            "<tr><td colspan=\"3\">No {} recorded.</td></tr>",
            related.relation.label().to_lowercase()
        );
    }
    for node in &related.nodes {
        rows.push_str(&related_row(node));
    }
    format!(
        "{trail}<table id=\"value-{kind}-{id}\">\
<caption>{label} of {name}</caption>\
<thead><tr><th>ID</th><th>Name</th><th>Description</th></tr></thead>\
<tbody>{rows}</tbody>\
</table>",
        kind = related.relation.label().to_lowercase(),
        id = related.node.id,
        label = related.relation.label(),
        name = escape(&related.node.name),
        trail = ancestry(related),
    )
}

/// Breadcrumb line naming every transitive parent; empty for a root value.
fn ancestry(related: &Related) -> String {
    if related.ancestors.is_empty() {
        return String::new();
    }
    let names = related
        .ancestors
        .iter()
        .map(|a| escape(&a.name))
        .collect::<Vec<_>>()
        .join(" &rsaquo; ");
    format!(
        "<p class=\"ancestry\">{} sits under {names}</p>",
        escape(&related.node.name)
    )
}

fn related_row(node: &Aim) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        node.id,
        escape(&node.name),
        escape(node.description_text()),
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::graph::Relation;

    fn summary(id: i64, name: &str, parents: &str) -> AimSummary {
        AimSummary {
            id,
            name: name.into(),
            description: Some(format!("about {name}")),
            parent_names: parents.into(),
        }
    }

    #[test]
    fn table_lists_every_value() {
        let html = values_table(&[
            summary(1, "Health", ""),
            summary(2, "Career", ""),
            summary(3, "Family", ""),
        ]);
        for name in ["Health", "Career", "Family"] {
            assert!(html.contains(name), "missing {name}");
        }
        assert!(html.starts_with("<table id=\"values-list\">"));
        assert!(!html.contains("<html"));
    }

    #[test]
    fn row_shows_parent_names_and_delete_target() {
        let html = value_row(&summary(7, "Cook", "Health, Family"));
        assert!(html.contains("<td>Health, Family</td>"));
        assert!(html.contains("hx-delete=\"/values?valueID=7\""));
        assert!(html.contains("hx-target=\"#value-row-7\""));
        assert!(html.contains("<form method=\"post\" action=\"/values/delete\""));
        assert!(html.contains("name=\"valueID\" value=\"7\""));
    }

    #[test]
    fn empty_table_has_placeholder_row() {
        assert!(values_table(&[]).contains("No values yet."));
    }

    fn aim(id: i64, name: &str) -> Aim {
        Aim {
            id,
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn related_table_captions_direction() {
        let related = Related {
            relation: Relation::Children,
            node: aim(1, "Health"),
            nodes: vec![],
            ancestors: vec![],
        };
        let html = related_table(&related);
        assert!(html.contains("<caption>Children of Health</caption>"));
        assert!(html.contains("No children recorded."));
        assert!(!html.contains("class=\"ancestry\""));
    }

    #[test]
    fn related_table_shows_ancestor_trail() {
        let related = Related {
            relation: Relation::Parents,
            node: aim(3, "Run"),
            nodes: vec![aim(2, "Fitness")],
            ancestors: vec![aim(1, "Health & Body"), aim(2, "Fitness")],
        };
        let html = related_table(&related);
        assert!(html.starts_with(
            "<p class=\"ancestry\">Run sits under Health &amp; Body &rsaquo; Fitness</p>"
        ));
    }
}
