//! The single request handler: classify, run the operation, render.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use sqlx::PgPool;
use tracing::debug;

use pds_core::edit::PlanEditor;
use pds_core::error::parse_id;
use pds_core::graph::{Relation, ValueGraph};
use pds_core::records::{self, BehaviourDraft, JournalDraft, PlanDraft, StatementDraft};
use pds_core::render::{self, Listing, MARKER_HEADER, Outcome, Record, RenderMode, Rendered};
use pds_core::resource::Resource;
use pds_core::{ServiceError, ServiceResult};

use super::classify::{self, Operation, Route, RouteError, Target};
use super::error::AppError;
use super::form::FormData;

pub async fn dispatch(
    State(pool): State<PgPool>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let mode = RenderMode::from_marker(
        headers
            .get(MARKER_HEADER)
            .and_then(|value| value.to_str().ok()),
    );
    let route = classify::classify(&method, uri.path())?;
    debug!(%method, path = uri.path(), ?route, ?mode, "request classified");

    let form = FormData::parse(uri.query(), &body)?;
    let outcome = execute(&pool, &route, &form).await?;

    Ok(respond(render::dispatch(&outcome, mode)))
}

fn respond(rendered: Rendered) -> Response {
    match rendered {
        Rendered::Document(html) | Rendered::Fragment(html) => Html(html).into_response(),
        Rendered::Empty => StatusCode::OK.into_response(),
        Rendered::Redirect(path) => Redirect::to(path).into_response(),
    }
}

/// The record id an operation acts on, from the path or the named field.
fn target_id(route: &Route, form: &FormData) -> ServiceResult<i64> {
    match &route.target {
        Target::Id(id) => Ok(*id),
        Target::Field(field) => parse_id(field, form.get(field).unwrap_or_default()),
        other => Err(ServiceError::validation(format!(
            "operation needs a record id, got {other:?}"
        ))),
    }
}

async fn execute(pool: &PgPool, route: &Route, form: &FormData) -> Result<Outcome, AppError> {
    use Operation::*;

    let outcome = match (route.resource, route.operation) {
        (Resource::Home, List) => Outcome::Home,

        (Resource::Values, op) => values(pool, op, route, form).await?,
        (Resource::Plans, op) => plans(pool, op, route, form).await?,

        (Resource::Journals, List) => {
            let filter = match &route.target {
                Target::JournalType(kind) => Some(kind.clone()),
                _ => None,
            };
            let journals = records::list_journals(pool, filter.as_deref()).await?;
            Outcome::Listing(Listing::Journals { journals, filter })
        }
        (Resource::Journals, Create) => {
            let draft = JournalDraft {
                title: form.text("title"),
                content: form.text("content"),
                journal_type: form.text("journal_type"),
            };
            Outcome::Created(Record::Journal(records::create_journal(pool, &draft).await?))
        }
        (Resource::Journals, Show) => {
            records::get_journal(pool, target_id(route, form)?).await?;
            Outcome::Shown(Resource::Journals)
        }
        (Resource::Journals, Delete) => {
            records::delete_journal(pool, target_id(route, form)?).await?;
            Outcome::Deleted(Resource::Journals)
        }

        (Resource::Statements, List) => {
            Outcome::Listing(Listing::Statements(records::list_statements(pool).await?))
        }
        (Resource::Statements, Create) => {
            let draft = StatementDraft {
                content: form.text("content"),
                priority: form.text("priority"),
            };
            Outcome::Created(Record::Statement(
                records::create_statement(pool, &draft).await?,
            ))
        }
        (Resource::Statements, Delete) => {
            records::delete_statement(pool, target_id(route, form)?).await?;
            Outcome::Deleted(Resource::Statements)
        }

        (Resource::Behaviours, List) => {
            let behaviours = records::list_behaviours(pool).await?;
            let values = ValueGraph::new(pool).list_all().await?;
            Outcome::Listing(Listing::Behaviours { behaviours, values })
        }
        (Resource::Behaviours, Create) => {
            let draft = BehaviourDraft {
                name: form.text("name"),
                description: form.text("description"),
                mark: form.text("mark"),
                conflicting_aim_ref: form.text("conflictingAimID"),
            };
            Outcome::Created(Record::Behaviour(
                records::create_behaviour(pool, &draft).await?,
            ))
        }
        (Resource::Behaviours, Delete) => {
            records::delete_behaviour(pool, target_id(route, form)?).await?;
            Outcome::Deleted(Resource::Behaviours)
        }

        (resource, operation) => {
            return Err(RouteError::NotFound(format!("{operation:?} on {resource:?}")).into());
        }
    };

    Ok(outcome)
}

async fn values(
    pool: &PgPool,
    operation: Operation,
    route: &Route,
    form: &FormData,
) -> Result<Outcome, AppError> {
    let graph = ValueGraph::new(pool);

    let outcome = match operation {
        Operation::List => Outcome::Listing(Listing::Values(graph.summaries().await?)),
        Operation::Create => {
            let parents = form
                .get_all("parents")
                .into_iter()
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| parse_id("parent value ID", raw))
                .collect::<ServiceResult<Vec<i64>>>()?;
            let aim = graph
                .create(&form.text("name"), form.get("description"), &parents)
                .await?;
            Outcome::Created(Record::Value(graph.summary(aim.id).await?))
        }
        Operation::Delete => {
            graph.delete(target_id(route, form)?).await?;
            Outcome::Deleted(Resource::Values)
        }
        Operation::ShowChildren => {
            Outcome::Related(graph.related(target_id(route, form)?, Relation::Children).await?)
        }
        Operation::ShowParents => {
            Outcome::Related(graph.related(target_id(route, form)?, Relation::Parents).await?)
        }
        other => return Err(RouteError::NotFound(format!("{other:?} on values")).into()),
    };

    Ok(outcome)
}

async fn plans(
    pool: &PgPool,
    operation: Operation,
    route: &Route,
    form: &FormData,
) -> Result<Outcome, AppError> {
    let editor = PlanEditor::new(pool);

    let outcome = match operation {
        Operation::List => {
            let plans = records::list_plans(pool).await?;
            let values = ValueGraph::new(pool).list_all().await?;
            Outcome::Listing(Listing::Plans { plans, values })
        }
        Operation::Create => {
            let draft = PlanDraft {
                name: form.text("name"),
                description: form.text("description"),
                resources_required: form.text("resources"),
                value_ref: form.text("valueID"),
            };
            Outcome::Created(Record::Plan(records::create_plan(pool, &draft).await?))
        }
        Operation::Delete => {
            records::delete_plan(pool, target_id(route, form)?).await?;
            Outcome::Deleted(Resource::Plans)
        }
        Operation::EditForm => Outcome::PlanRow(editor.edit(target_id(route, form)?).await?),
        Operation::CancelEdit => Outcome::PlanRow(editor.cancel(target_id(route, form)?).await?),
        Operation::Update => {
            let draft = PlanDraft {
                name: form.text("name"),
                description: form.text("description"),
                resources_required: form.text("resources_required"),
                value_ref: form.text("value_id"),
            };
            Outcome::PlanRow(editor.save(target_id(route, form)?, &draft).await?)
        }
        other => return Err(RouteError::NotFound(format!("{other:?} on plans")).into()),
    };

    Ok(outcome)
}
