//! Request classification: `(method, path)` to a resource, an operation and
//! the operation's target.

use axum::http::Method;
use percent_encoding::percent_decode_str;
use thiserror::Error;

use pds_core::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Show,
    Create,
    Update,
    Delete,
    ShowChildren,
    ShowParents,
    EditForm,
    CancelEdit,
}

impl Operation {
    fn needs_id(self) -> bool {
        !matches!(self, Self::List | Self::Create)
    }
}

/// Where the operation's subject comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    None,
    /// Id taken from the path (`/plans/edit/42`).
    Id(i64),
    /// Id taken from the named query or form field (`?valueID=3`).
    Field(&'static str),
    /// Journal type filter from `/journals/type/{type}`.
    JournalType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub resource: Resource,
    pub operation: Operation,
    pub target: Target,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route for {0}")]
    NotFound(String),

    /// The path exists but not for this method; `allow` lists the methods
    /// that do match.
    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        allow: Vec<Method>,
    },

    #[error("invalid id in path: {0:?}")]
    InvalidId(String),
}

/// Name of the query/form field carrying a record id for `resource`.
pub fn id_field(resource: Resource) -> &'static str {
    match resource {
        Resource::Home => "id",
        Resource::Journals => "journalID",
        Resource::Plans => "planID",
        Resource::Statements => "statementID",
        Resource::Behaviours => "behaviourID",
        Resource::Values => "valueID",
    }
}

pub fn classify(method: &Method, path: &str) -> Result<Route, RouteError> {
    let trimmed = path.trim_end_matches('/');
    let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

    use Operation::*;
    use Resource as R;

    let get = Method::GET;
    let post = Method::POST;
    let put = Method::PUT;
    let delete = Method::DELETE;

    let (resource, table, path_target): (Resource, Vec<(Method, Operation)>, Option<Target>) =
        match segments.as_slice() {
            [] => (R::Home, vec![(get, List)], None),

            ["values"] => (
                R::Values,
                vec![(get, List), (post, Create), (delete, Delete)],
                None,
            ),
            ["values", "delete"] => (R::Values, vec![(get, Delete), (post, Delete)], None),
            ["values", "children"] => (R::Values, vec![(get, ShowChildren)], None),
            ["values", "parents"] => (R::Values, vec![(get, ShowParents)], None),

            ["plans"] => (
                R::Plans,
                vec![(get, List), (post, Create), (delete, Delete)],
                None,
            ),
            ["plans", "create"] => (R::Plans, vec![(post, Create)], None),
            ["plans", "delete", id] => (
                R::Plans,
                vec![(post, Delete), (delete, Delete)],
                Some(path_id(id)?),
            ),
            ["plans", "edit", id] => (R::Plans, vec![(get, EditForm)], Some(path_id(id)?)),
            ["plans", "cancel-edit", id] => {
                (R::Plans, vec![(get, CancelEdit)], Some(path_id(id)?))
            }
            ["plans", "update", id] => (R::Plans, vec![(put, Update)], Some(path_id(id)?)),

            ["journals"] => (R::Journals, vec![(get, List), (post, Create)], None),
            ["journals", "delete"] => (R::Journals, vec![(post, Delete)], None),
            ["journals", "type", kind] if !kind.is_empty() => (
                R::Journals,
                vec![(get, List)],
                Some(Target::JournalType(decode_segment(kind, path)?)),
            ),
            ["journals", "type"] => return Err(RouteError::NotFound(path.to_owned())),
            ["journals", id] => (R::Journals, vec![(get, Show)], Some(path_id(id)?)),

            ["statements"] => (
                R::Statements,
                vec![(get, List), (post, Create), (delete, Delete)],
                None,
            ),
            ["statements", "create"] => (R::Statements, vec![(post, Create)], None),
            ["statements", "delete"] => (R::Statements, vec![(get, Delete), (post, Delete)], None),

            ["behaviours"] => (
                R::Behaviours,
                vec![(get, List), (post, Create), (delete, Delete)],
                None,
            ),
            ["behaviours", "create"] => (R::Behaviours, vec![(post, Create)], None),
            ["behaviours", "delete"] => {
                (R::Behaviours, vec![(post, Delete), (delete, Delete)], None)
            }

            _ => return Err(RouteError::NotFound(path.to_owned())),
        };

    let Some(operation) = table
        .iter()
        .find(|(m, _)| m == method)
        .map(|(_, op)| *op)
    else {
        return Err(RouteError::MethodNotAllowed {
            method: method.clone(),
            path: path.to_owned(),
            allow: table.into_iter().map(|(m, _)| m).collect(),
        });
    };

    let target = match path_target {
        Some(target) => target,
        None if operation.needs_id() => Target::Field(id_field(resource)),
        None => Target::None,
    };

    Ok(Route {
        resource,
        operation,
        target,
    })
}

/// Percent-decode one path segment. Bytes that are not UTF-8 once decoded
/// cannot name a stored value, so they answer 404.
fn decode_segment(raw: &str, path: &str) -> Result<String, RouteError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| RouteError::NotFound(path.to_owned()))
}

fn path_id(raw: &str) -> Result<Target, RouteError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(Target::Id(id)),
        _ => Err(RouteError::InvalidId(raw.to_owned())),
    }
}
