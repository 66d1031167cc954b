//! HTTP surface: one fallback handler that classifies every request, plus
//! static assets.

mod classify;
mod error;
mod form;
mod handlers;

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn build_router(pool: PgPool, static_dir: &Path) -> Router {
    Router::new()
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}

pub async fn run_serve(pool: PgPool, bind: &str, port: u16, static_dir: &Path) -> Result<()> {
    let app = build_router(pool, static_dir);
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {bind}:{port}"))?;
    info!(static_dir = %static_dir.display(), "pds serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("pds serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl+C; shutting down");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use sqlx::PgPool;
    use tower::ServiceExt;

    use pds_core::graph::ValueGraph;
    use pds_core::records::{self, PlanDraft};
    use pds_test_utils::{create_test_db, drop_test_db};

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    fn static_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../static")
    }

    async fn send(
        pool: &PgPool,
        method: Method,
        uri: &str,
        fragment: bool,
        form: Option<&str>,
    ) -> axum::response::Response {
        let app = super::build_router(pool.clone(), &static_dir());
        let mut builder = Request::builder().method(method).uri(uri);
        if fragment {
            builder = builder.header("HX-Request", "true");
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_owned())
            }
            None => Body::empty(),
        };
        app.oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &axum::response::Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("redirect should carry a location")
            .to_str()
            .unwrap()
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn values_listing_respects_render_mode() {
        let (pool, db_name) = create_test_db().await;
        let graph = ValueGraph::new(&pool);
        for name in ["Health", "Career", "Family"] {
            graph.create(name, None, &[]).await.unwrap();
        }

        let resp = send(&pool, Method::GET, "/values", true, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let fragment = body_text(resp).await;
        assert!(!fragment.contains("<html"));
        for name in ["Health", "Career", "Family"] {
            assert!(fragment.contains(name), "fragment missing {name}");
        }

        let resp = send(&pool, Method::GET, "/values", false, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let document = body_text(resp).await;
        assert!(document.contains("<html"));
        for name in ["Health", "Career", "Family"] {
            assert!(document.contains(name), "document missing {name}");
        }

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn home_page_is_a_document() {
        let (pool, db_name) = create_test_db().await;

        let resp = send(&pool, Method::GET, "/", true, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_owned();
        assert!(content_type.contains("text/html"), "got {content_type}");
        assert!(body_text(resp).await.contains("<html"));

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn stylesheet_is_served() {
        let (pool, db_name) = create_test_db().await;

        let resp = send(&pool, Method::GET, "/static/style.css", false, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_owned();
        assert!(content_type.starts_with("text/css"), "got {content_type}");

        let page = body_text(send(&pool, Method::GET, "/plans", false, None).await).await;
        assert!(page.contains("href=\"/static/style.css\""));
        assert!(page.contains(pds_core::views::HTMX_SRC));

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn value_create_and_relations() {
        let (pool, db_name) = create_test_db().await;
        let graph = ValueGraph::new(&pool);
        let health = graph.create("Health", None, &[]).await.unwrap();
        let family = graph.create("Family", None, &[]).await.unwrap();

        let form = format!("name=Cook&description=at+home&parents={}&parents={}", health.id, family.id);
        let resp = send(&pool, Method::POST, "/values", true, Some(&form)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let row = body_text(resp).await;
        assert!(row.starts_with("<tr"));
        assert!(row.contains("Health, Family"));

        let uri = format!("/values/children?valueID={}", health.id);
        let resp = send(&pool, Method::GET, &uri, true, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Cook"));

        let cook = graph.summaries().await.unwrap().into_iter().find(|v| v.name == "Cook").unwrap();
        let uri = format!("/values/parents?valueID={}", cook.id);
        let parents = body_text(send(&pool, Method::GET, &uri, true, None).await).await;
        assert!(parents.contains("<p class=\"ancestry\">Cook sits under Health &rsaquo; Family</p>"));

        let resp = send(&pool, Method::GET, "/values/parents?valueID=9999", true, None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = send(&pool, Method::POST, "/values", false, Some("name=Orphan&parents=9999")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn plan_edit_cycle_over_http() {
        let (pool, db_name) = create_test_db().await;
        let graph = ValueGraph::new(&pool);
        let health = graph.create("Health", None, &[]).await.unwrap();
        let career = graph.create("Career", None, &[]).await.unwrap();

        let form = format!("name=Run&description=5k&resources=shoes&valueID={}", health.id);
        let resp = send(&pool, Method::POST, "/plans/create", false, Some(&form)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/plans");
        let plan_id = records::list_plans(&pool).await.unwrap()[0].id;

        let resp = send(&pool, Method::GET, &format!("/plans/edit/{plan_id}"), true, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let editing = body_text(resp).await;
        assert!(editing.contains(&format!("<option value=\"{}\" selected>Health</option>", health.id)));

        let resp = send(&pool, Method::GET, &format!("/plans/cancel-edit/{plan_id}"), true, None).await;
        let cancelled = body_text(resp).await;
        let listing = body_text(send(&pool, Method::GET, "/plans", true, None).await).await;
        assert!(listing.contains(&cancelled), "cancelled row should match the listing row");

        let form = format!("name=Run&description=5k&resources_required=shoes&value_id={}", career.id);
        let resp = send(&pool, Method::PUT, &format!("/plans/update/{plan_id}"), true, Some(&form)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let saved = body_text(resp).await;
        assert!(saved.contains("<td>Career</td>"));
        assert!(!saved.contains("<input"));

        let resp = send(
            &pool,
            Method::PUT,
            &format!("/plans/update/{plan_id}"),
            true,
            Some("name=Run&value_id=career"),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(&pool, Method::GET, "/plans/edit/abc", true, None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(&pool, Method::GET, "/plans/edit/9999", true, None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn orphaned_plan_lists_as_unknown() {
        let (pool, db_name) = create_test_db().await;
        let graph = ValueGraph::new(&pool);
        let health = graph.create("Health", None, &[]).await.unwrap();
        records::create_plan(
            &pool,
            &PlanDraft {
                name: "Run".into(),
                value_ref: health.id.to_string(),
                ..PlanDraft::default()
            },
        )
        .await
        .unwrap();

        let resp = send(&pool, Method::DELETE, &format!("/values?valueID={}", health.id), true, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.is_empty());

        let resp = send(&pool, Method::GET, "/plans", false, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("<td>Unknown</td>"));

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn deletes_redirect_in_full_mode_and_report_missing() {
        let (pool, db_name) = create_test_db().await;
        let statement = records::create_statement(
            &pool,
            &records::StatementDraft {
                content: "I keep promises".into(),
                priority: "1".into(),
            },
        )
        .await
        .unwrap();

        let form = format!("statementID={}", statement.id);
        let resp = send(&pool, Method::POST, "/statements/delete", false, Some(&form)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/statements");

        let resp = send(&pool, Method::POST, "/statements/delete", false, Some(&form)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = send(&pool, Method::DELETE, "/statements", true, None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn delete_forms_work_without_htmx() {
        let (pool, db_name) = create_test_db().await;
        let graph = ValueGraph::new(&pool);
        let health = graph.create("Health", None, &[]).await.unwrap();
        let spare = graph.create("Spare", None, &[]).await.unwrap();
        let plan = records::create_plan(
            &pool,
            &PlanDraft {
                name: "Run".into(),
                value_ref: health.id.to_string(),
                ..PlanDraft::default()
            },
        )
        .await
        .unwrap();

        let listing = body_text(send(&pool, Method::GET, "/plans", false, None).await).await;
        assert!(listing.contains(&format!("action=\"/plans/delete/{}\"", plan.id)));

        let resp = send(&pool, Method::POST, &format!("/plans/delete/{}", plan.id), false, None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/plans");
        assert!(records::list_plans(&pool).await.unwrap().is_empty());

        let form = format!("valueID={}", spare.id);
        let resp = send(&pool, Method::POST, "/values/delete", false, Some(&form)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/values");
        let remaining: Vec<i64> = graph.list_all().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(remaining, vec![health.id]);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn journals_create_filter_and_show() {
        let (pool, db_name) = create_test_db().await;

        let resp = send(
            &pool,
            Method::POST,
            "/journals",
            true,
            Some("title=Family+Dinner&content=precious&journal_type=gratitude"),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Family Dinner"));

        let resp = send(
            &pool,
            Method::POST,
            "/journals",
            false,
            Some("title=Traffic+Jam&journal_type=frustrations"),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let resp = send(&pool, Method::GET, "/journals/type/gratitude", true, None).await;
        let filtered = body_text(resp).await;
        assert!(filtered.contains("Family Dinner"));
        assert!(!filtered.contains("Traffic Jam"));

        let resp = send(
            &pool,
            Method::POST,
            "/journals",
            true,
            Some("title=Before+work&journal_type=morning+pages"),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = send(&pool, Method::GET, "/journals/type/morning%20pages", true, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let filtered = body_text(resp).await;
        assert!(filtered.contains("Before work"));
        assert!(!filtered.contains("Family Dinner"));

        let id = records::list_journals(&pool, None).await.unwrap()[0].id;
        let resp = send(&pool, Method::GET, &format!("/journals/{id}"), true, None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/journals");

        let resp = send(&pool, Method::GET, "/journals/99999", false, None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = send(&pool, Method::POST, "/journals", true, Some("title=No+type")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn behaviour_create_requires_known_value() {
        let (pool, db_name) = create_test_db().await;
        let health = ValueGraph::new(&pool).create("Health", None, &[]).await.unwrap();

        let form = format!("name=Doomscrolling&mark=-&conflictingAimID={}", health.id);
        let resp = send(&pool, Method::POST, "/behaviours/create", true, Some(&form)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("<td>Health</td>"));

        let resp = send(
            &pool,
            Method::POST,
            "/behaviours",
            true,
            Some("name=Snacking&conflictingAimID=oops"),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn unknown_routes_and_methods() {
        let (pool, db_name) = create_test_db().await;

        let resp = send(&pool, Method::GET, "/nowhere", false, None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = send(&pool, Method::PATCH, "/plans", false, None).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(resp.headers().contains_key(header::ALLOW));

        pool.close().await;
        drop_test_db(&db_name).await;
    }
}
