use pds_db::models::{Aim, Behaviour};

use super::{escape, value_options};

pub fn behaviour_row(behaviour: &Behaviour) -> String {
    format!(
        "<tr id=\"behaviour-row-{id}\">\
<td>{name}</td>\
<td>{description}</td>\
<td>{mark}</td>\
<td>{aim}</td>\
<td><button hx-delete=\"/behaviours?behaviourID={id}\" hx-confirm=\"Delete this behaviour?\" \
hx-target=\"#behaviour-row-{id}\" hx-swap=\"outerHTML\">Delete</button></td>\
</tr>",
        id = behaviour.id,
        name = escape(&behaviour.name),
        description = escape(&behaviour.description),
        mark = escape(&behaviour.mark),
        aim = escape(behaviour.conflicting_aim_label()),
    )
}

pub fn behaviours_table(behaviours: &[Behaviour]) -> String {
    let mut rows = String::new();
    if behaviours.is_empty() {
        rows.push_str("<tr><td colspan=\"5\">No behaviours yet.</td></tr>");
    }
    for behaviour in behaviours {
        rows.push_str(&behaviour_row(behaviour));
    }
    format!(
        "<table id=\"behaviours-list\">\
<thead><tr><th>Name</th><th>Description</th><th>Mark</th><th>Conflicts with</th><th></th></tr></thead>\
<tbody id=\"behaviours-body\">{rows}</tbody>\
</table>"
    )
}

pub fn behaviour_form(values: &[Aim]) -> String {
    let options = value_options(values.iter().map(|v| (v.id, v.name.as_str())), None);
    format!(
        "<form method=\"post\" action=\"/behaviours/create\" \
hx-post=\"/behaviours/create\" hx-target=\"#behaviours-body\" hx-swap=\"beforeend\">\
<label>Name <input type=\"text\" name=\"name\" required></label>\
<label>Description <textarea name=\"description\"></textarea></label>\
<label>Mark <input type=\"text\" name=\"mark\"></label>\
<label>Conflicts with <select name=\"conflictingAimID\" required>{options}</select></label>\
<button type=\"submit\">Add behaviour</button>\
</form>"
    )
}

pub fn behaviours_body(behaviours: &[Behaviour], values: &[Aim]) -> String {
    format!("{}{}", behaviour_form(values), behaviours_table(behaviours))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn behaviour(aim: Option<&str>) -> Behaviour {
        Behaviour {
            id: 6,
            name: "Doomscrolling".into(),
            description: "phone in bed".into(),
            mark: "-".into(),
            conflicting_aim_id: 1,
            conflicting_aim_name: aim.map(str::to_owned),
        }
    }

    #[test]
    fn row_names_conflicting_aim() {
        let html = behaviour_row(&behaviour(Some("Health")));
        assert!(html.contains("<td>Health</td>"));
        assert!(html.contains("hx-delete=\"/behaviours?behaviourID=6\""));
    }

    #[test]
    fn row_tolerates_deleted_aim() {
        assert!(behaviour_row(&behaviour(None)).contains("<td>Unknown</td>"));
    }
}
