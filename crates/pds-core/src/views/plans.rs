use pds_db::models::{Aim, Plan, PlanWithValue};

use super::{escape, value_options};
use crate::edit::PlanRow;

fn row_id(id: i64) -> String {
    format!("plan-row-{id}")
}

/// Read-only plan row with its Edit and Delete controls.
pub fn plan_row(plan: &PlanWithValue) -> String {
    format!(
        "<tr id=\"{row}\">\
<td>{name}</td>\
<td>{description}</td>\
<td>{resources}</td>\
<td>{value}</td>\
<td>\
<button hx-get=\"/plans/edit/{id}\" hx-target=\"#{row}\" hx-swap=\"outerHTML\">Edit</button> \
<form method=\"post\" action=\"/plans/delete/{id}\" hx-delete=\"/plans/delete/{id}\" \
hx-confirm=\"Delete this plan?\" hx-target=\"#{row}\" hx-swap=\"outerHTML\">\
<button type=\"submit\">Delete</button>\
</form>\
</td>\
</tr>",
        row = row_id(plan.id),
        id = plan.id,
        name = escape(&plan.name),
        description = escape(&plan.description),
        resources = escape(&plan.resources_required),
        value = escape(plan.value_label()),
    )
}

/// Editable plan row. Inputs are prefilled from the stored plan and the
/// selector marks the plan's current value.
pub fn plan_edit_row(plan: &Plan, values: &[Aim]) -> String {
    let options = value_options(
        values.iter().map(|v| (v.id, v.name.as_str())),
        Some(plan.value_id),
    );
    format!(
        "<tr id=\"{row}\" class=\"editing\">\
<td><input type=\"text\" name=\"name\" value=\"{name}\" required></td>\
<td><input type=\"text\" name=\"description\" value=\"{description}\"></td>\
<td><input type=\"text\" name=\"resources_required\" value=\"{resources}\"></td>\
<td><select name=\"value_id\">{options}</select></td>\
<td>\
<button hx-put=\"/plans/update/{id}\" hx-include=\"closest tr\" \
hx-target=\"#{row}\" hx-swap=\"outerHTML\">Save</button> \
<button hx-get=\"/plans/cancel-edit/{id}\" hx-target=\"#{row}\" hx-swap=\"outerHTML\">Cancel</button>\
</td>\
</tr>",
        row = row_id(plan.id),
        id = plan.id,
        name = escape(&plan.name),
        description = escape(&plan.description),
        resources = escape(&plan.resources_required),
    )
}

/// A plan row in whichever state the edit cycle left it.
pub fn render_row(row: &PlanRow) -> String {
    match row {
        PlanRow::Viewing(plan) => plan_row(plan),
        PlanRow::Editing { plan, values } => plan_edit_row(plan, values),
    }
}

pub fn plans_table(plans: &[PlanWithValue]) -> String {
    let mut rows = String::new();
    if plans.is_empty() {
        rows.push_str("<tr><td colspan=\"5\">No plans yet.</td></tr>");
    }
    for plan in plans {
        rows.push_str(&plan_row(plan));
    }
    format!(
        "<table id=\"plans-list\">\
<thead><tr><th>Name</th><th>Description</th><th>Resources</th><th>Value</th><th></th></tr></thead>\
<tbody id=\"plans-body\">{rows}</tbody>\
</table>"
    )
}

pub fn plan_form(values: &[Aim]) -> String {
    let options = value_options(values.iter().map(|v| (v.id, v.name.as_str())), None);
    format!(
        "<form method=\"post\" action=\"/plans/create\" \
hx-post=\"/plans/create\" hx-target=\"#plans-body\" hx-swap=\"beforeend\">\
<label>Name <input type=\"text\" name=\"name\" required></label>\
<label>Description <textarea name=\"description\"></textarea></label>\
<label>Resources required <textarea name=\"resources\"></textarea></label>\
<label>Value <select name=\"valueID\" required>{options}</select></label>\
<button type=\"submit\">Add plan</button>\
</form>"
    )
}

pub fn plans_body(plans: &[PlanWithValue], values: &[Aim]) -> String {
    format!("{}{}", plan_form(values), plans_table(plans))
}

/// Full page for a single plan row, used when an edit-cycle request
/// arrives without the fragment marker. The back link lands on the same row
/// in the listing.
pub fn plan_row_body(plan_row: &PlanRow) -> String {
    format!(
        "<table id=\"plans-list\">\
<thead><tr><th>Name</th><th>Description</th><th>Resources</th><th>Value</th><th></th></tr></thead>\
<tbody id=\"plans-body\">{row}</tbody>\
</table>\
<p><a href=\"/plans#{anchor}\">All plans</a></p>",
        row = render_row(plan_row),
        anchor = row_id(plan_row.plan_id()),
    )
}
