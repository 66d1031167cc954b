use std::fmt::Write as _;

use pds_db::models::Journal;

use super::escape;

/// Journal types offered by the form and the filter links.
pub const JOURNAL_TYPES: [&str; 2] = ["gratitude", "frustrations"];

const DATE_FORMAT: &str = "%b %d, %Y at %H:%M";

pub fn journal_entry(journal: &Journal) -> String {
    format!(
        "<article id=\"journal-{id}\" class=\"journal\">\
<header><h2>{title}</h2>\
<span class=\"journal-type\">{kind}</span> \
<time datetime=\"{iso}\">{date}</time></header>\
<p>{content}</p>\
<form method=\"post\" action=\"/journals/delete\" \
hx-post=\"/journals/delete\" hx-confirm=\"Delete this entry?\" \
hx-target=\"#journal-{id}\" hx-swap=\"outerHTML\">\
<input type=\"hidden\" name=\"journalID\" value=\"{id}\">\
<button type=\"submit\">Delete</button>\
</form>\
</article>",
        id = journal.id,
        title = escape(&journal.title),
        kind = escape(&journal.journal_type),
        iso = journal.created_at.to_rfc3339(),
        date = journal.created_at.format(DATE_FORMAT),
        content = escape(journal.content_text()),
    )
}

pub fn journal_list(journals: &[Journal]) -> String {
    let mut entries = String::new();
    if journals.is_empty() {
        entries.push_str("<p class=\"empty\">No journal entries yet.</p>");
    }
    for journal in journals {
        entries.push_str(&journal_entry(journal));
    }
    format!("<div id=\"journal-list\">{entries}</div>")
}

pub fn journal_form() -> String {
    let mut options = String::new();
    for kind in JOURNAL_TYPES {
        let _ = write!(options, "<option value=\"{kind}\">{kind}</option>");
    }
    format!(
        "<form method=\"post\" action=\"/journals\" \
hx-post=\"/journals\" hx-target=\"#journal-list\" hx-swap=\"afterbegin\">\
<label>Title <input type=\"text\" name=\"title\" required></label>\
<label>Type <select name=\"journal_type\" required>{options}</select></label>\
<label>Entry <textarea name=\"content\"></textarea></label>\
<button type=\"submit\">Save entry</button>\
</form>"
    )
}

fn filter_links(active: Option<&str>) -> String {
    let mut links = String::new();
    let all_class = if active.is_none() { " class=\"active\"" } else { "" };
    let _ = write!(
        links,
        "<a href=\"/journals\" hx-get=\"/journals\" hx-target=\"#journal-list\" \
hx-swap=\"outerHTML\"{all_class}>All</a>"
    );
    for kind in JOURNAL_TYPES {
        let class = if active == Some(kind) { " class=\"active\"" } else { "" };
        let _ = write!(
            links,
            " <a href=\"/journals/type/{kind}\" hx-get=\"/journals/type/{kind}\" \
hx-target=\"#journal-list\" hx-swap=\"outerHTML\"{class}>{kind}</a>"
        );
    }
    format!("<nav class=\"journal-filter\">{links}</nav>")
}

pub fn journals_body(journals: &[Journal], filter: Option<&str>) -> String {
    format!(
        "{form}{filters}{list}",
        form = journal_form(),
        filters = filter_links(filter),
        list = journal_list(journals),
    )
}
