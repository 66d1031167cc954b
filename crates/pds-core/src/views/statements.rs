use pds_db::models::Statement;

use super::escape;

pub fn statement_row(statement: &Statement) -> String {
    format!(
        "<tr id=\"statement-row-{id}\">\
<td>{content}</td>\
<td>{priority}</td>\
<td><button hx-delete=\"/statements?statementID={id}\" hx-confirm=\"Delete this statement?\" \
hx-target=\"#statement-row-{id}\" hx-swap=\"outerHTML\">Delete</button></td>\
</tr>",
        id = statement.id,
        content = escape(&statement.content),
        priority = statement.priority,
    )
}

pub fn statements_table(statements: &[Statement]) -> String {
    let mut rows = String::new();
    if statements.is_empty() {
        rows.push_str("<tr><td colspan=\"3\">No statements yet.</td></tr>");
    }
    for statement in statements {
        rows.push_str(&statement_row(statement));
    }
    format!(
        "<table id=\"statements-list\">\
<thead><tr><th>Statement</th><th>Priority</th><th></th></tr></thead>\
<tbody id=\"statements-body\">{rows}</tbody>\
</table>"
    )
}

pub fn statement_form() -> String {
    "<form method=\"post\" action=\"/statements/create\" \
hx-post=\"/statements/create\" hx-target=\"#statements-body\" hx-swap=\"beforeend\">\
<label>Statement <textarea name=\"content\" required></textarea></label>\
<label>Priority <input type=\"number\" name=\"priority\" value=\"0\"></label>\
<button type=\"submit\">Add statement</button>\
</form>"
        .to_owned()
}

pub fn statements_body(statements: &[Statement]) -> String {
    format!("{}{}", statement_form(), statements_table(statements))
}
