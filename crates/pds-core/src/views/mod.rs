//! HTML views: pure functions from rows to markup.
//!
//! Fragment views (tables, rows, journal entries) carry no document wrapper
//! so they can be swapped into an already-loaded page. [`page`] wraps a body
//! into a complete document.

pub mod behaviours;
pub mod journals;
pub mod plans;
pub mod statements;
pub mod values;

use std::fmt::Write as _;

use crate::resource::Resource;

/// Pinned htmx build loaded by every full page.
pub const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4/dist/htmx.min.js";

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// A complete HTML document with the navigation bar. `active` highlights
/// the current section.
pub fn page(title: &str, active: Resource, body: &str) -> String {
    let mut nav = String::new();
    for resource in Resource::NAV {
        let class = if resource == active {
            " class=\"active\""
        } else {
            ""
        };
        let _ = write!(
            nav,
            "<a href=\"{path}\"{class}>{label}</a>",
            path = resource.listing_path(),
            label = resource.title(),
        );
    }

    format!(
        "<!DOCTYPE html>\
<html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>{title} · pds</title>\
<link rel=\"stylesheet\" href=\"/static/style.css\">\
<script src=\"{HTMX_SRC}\"></script>\
</head><body>\
<nav><a href=\"/\">pds</a>{nav}</nav>\
<main><h1>{title}</h1>{body}</main>\
</body></html>",
        title = escape(title),
    )
}

/// Body of the landing page.
pub fn home() -> String {
    let mut links = String::new();
    for resource in Resource::NAV {
        let _ = write!(
            links,
            "<li><a href=\"{}\">{}</a></li>",
            resource.listing_path(),
            resource.title()
        );
    }
    format!("<p>Journal, plan and reflect against what matters.</p><ul>{links}</ul>")
}

/// `<option>` elements for a value selector, marking `selected` when given.
pub(crate) fn value_options<'v>(
    values: impl IntoIterator<Item = (i64, &'v str)>,
    selected: Option<i64>,
) -> String {
    let mut out = String::new();
    for (id, name) in values {
        let marker = if Some(id) == selected { " selected" } else { "" };
        let _ = write!(out, "<option value=\"{id}\"{marker}>{}</option>", escape(name));
    }
    out
}
