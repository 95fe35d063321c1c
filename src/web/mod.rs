// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Web UI: project list, project detail page and static content

pub mod templates;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Datelike;
use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::project::ProjectReference;
use crate::source::ContentSource;
use crate::viewer::ProjectViewer;
use crate::FolioError;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub source: Arc<dyn ContentSource>,
    templates: Environment<'static>,
}

impl AppState {
    pub fn new(config: AppConfig, source: Arc<dyn ContentSource>) -> Self {
        Self {
            config,
            source,
            templates: templates::environment(),
        }
    }
}

type HandlerResult<T> = std::result::Result<T, (StatusCode, String)>;

fn internal(e: FolioError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Create the web application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_root = format!("/{}", state.config.content.base_dir.trim_matches('/'));
    let static_files = ServeDir::new(state.config.content.projects_dir());

    Router::new()
        // Pages
        .route("/", get(index_page))
        .route("/project", get(project_page))
        // API endpoints
        .route("/api/project", get(api_get_project))
        .route("/health", get(health))
        // Demo links point here
        .nest_service(&static_root, static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Deserialize, Debug)]
struct ProjectQuery {
    project: Option<String>,
    title: Option<String>,
    tab: Option<String>,
}

impl ProjectQuery {
    fn reference(&self) -> HandlerResult<ProjectReference> {
        ProjectReference::new(self.project.clone().unwrap_or_default(), self.title.clone())
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
    }
}

async fn load_viewer(state: &AppState, query: &ProjectQuery) -> HandlerResult<ProjectViewer> {
    let reference = query.reference()?;
    let mut viewer = ProjectViewer::new(reference, &state.config);
    viewer.load(state.source.as_ref()).await;

    if let Some(ref tab) = query.tab {
        if !viewer.select(tab) {
            debug!("Ignoring tab '{}'", tab);
        }
    }
    Ok(viewer)
}

// === Page Handlers ===

#[derive(Serialize)]
struct ProjectLink {
    name: String,
    href: String,
}

async fn index_page(State(state): State<Arc<AppState>>) -> HandlerResult<Html<String>> {
    let projects = match list_projects(&state.config).await {
        Ok(projects) => projects,
        Err(e) => {
            warn!(
                "Cannot list projects in {}: {}",
                state.config.content.projects_dir().display(),
                e
            );
            Vec::new()
        }
    };

    let projects = projects
        .into_iter()
        .map(|name| ProjectLink {
            href: format!("/project?{}", project_query(&name)),
            name,
        })
        .collect::<Vec<_>>();

    let html = state
        .templates
        .get_template("index.html")
        .and_then(|t| {
            t.render(context! {
                projects => projects,
                base_dir => &state.config.content.base_dir,
                year => current_year(),
            })
        })
        .map_err(|e| internal(e.into()))?;

    Ok(Html(html))
}

/// A tab control and its stored content. All three are rendered into the
/// page and switched client-side.
#[derive(Serialize)]
struct TabControl<'a> {
    key: &'static str,
    label: &'static str,
    active: bool,
    content: &'a str,
}

fn tab_controls(viewer: &ProjectViewer) -> Vec<TabControl<'_>> {
    viewer
        .tabs()
        .into_iter()
        .map(|(tab, active)| TabControl {
            key: tab.as_str(),
            label: tab.label(),
            active,
            content: viewer.files().content(tab.key()),
        })
        .collect()
}

async fn project_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProjectQuery>,
) -> HandlerResult<Html<String>> {
    let viewer = load_viewer(&state, &query).await?;
    let tabs = tab_controls(&viewer);

    let html = state
        .templates
        .get_template("project.html")
        .and_then(|t| {
            t.render(context! {
                title => viewer.title(),
                description => viewer.description(),
                demo_link => viewer.demo_link(),
                tabs => tabs,
                code => viewer.code(),
                documentation => viewer.documentation(),
                year => current_year(),
            })
        })
        .map_err(|e| internal(e.into()))?;

    Ok(Html(html))
}

// === API Handlers ===

async fn api_get_project(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProjectQuery>,
) -> HandlerResult<Json<serde_json::Value>> {
    let viewer = load_viewer(&state, &query).await?;
    let body = serde_json::to_value(viewer.snapshot()).map_err(|e| internal(e.into()))?;
    Ok(Json(body))
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "source": state.source.name(),
    }))
}

// === Helpers ===

fn project_query(folder: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("project", folder)
        .finish()
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Project folders under the local content directory, sorted by name
pub async fn list_projects(config: &AppConfig) -> crate::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(config.content.projects_dir()).await?;
    let mut projects = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with('.') {
                projects.push(name.to_string());
            }
        }
    }

    projects.sort();
    Ok(projects)
}

/// Start the web server
pub async fn start_server(config: AppConfig, source: Arc<dyn ContentSource>) -> crate::Result<()> {
    let addr = format!("{}:{}", config.web.host, config.web.port);
    let state = Arc::new(AppState::new(config, source));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Web UI available at http://{}", addr);

    let router = create_router(state);
    axum::serve(listener, router)
        .await
        .map_err(|e| FolioError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DirSource;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    fn site() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("smallprojects").join("snake-game");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("index.html"), "<canvas id=\"board\"></canvas>").unwrap();
        std::fs::write(project.join("style.css"), "canvas { border: 1px solid; }").unwrap();
        std::fs::write(project.join("script.js"), "const speed = 5;").unwrap();
        std::fs::write(project.join("README.md"), "# Snake\n\nEat the apples.").unwrap();
        std::fs::create_dir_all(dir.path().join("smallprojects").join("react-demo")).unwrap();

        let mut config = AppConfig::default();
        config.content.root = dir.path().display().to_string();
        let source = Arc::new(DirSource::new(dir.path()));
        let router = create_router(Arc::new(AppState::new(config, source)));
        (dir, router)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_project_page() {
        let (_dir, router) = site();
        let (status, body) = get(router, "/project?project=snake-game&title=Snake").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<h1 id="projectTitle">Snake</h1>"#));
        assert!(body.contains("Viewing source for snake-game"));
        assert!(body.contains(r#"id="demoBtn""#));
        assert!(body.contains("&lt;canvas id=&quot;board&quot;&gt;"));
        assert!(body.contains("<h1>Snake</h1>"));
        assert_eq!(body.matches("tab-btn active").count(), 1);
        assert!(body.contains(r#"class="tab-btn active" data-tab="html""#));
    }

    #[tokio::test]
    async fn test_project_page_carries_every_tab() {
        let (dir, router) = site();
        let (status, body) = get(router, "/project?project=snake-game").await;
        assert_eq!(status, StatusCode::OK);

        // Removing a file after the page view is built changes nothing the page shows.
        std::fs::remove_file(dir.path().join("smallprojects/snake-game/style.css")).unwrap();

        assert!(body.contains(r#"<template data-tab="css">canvas { border: 1px solid; }</template>"#));
        assert!(body.contains(r#"<template data-tab="js">const speed = 5;</template>"#));
        assert!(body.contains(r#"<template data-tab="html">&lt;canvas"#));
        assert!(!body.contains("tab=css"));
        assert!(!body.contains("not found or inline styles used"));
        assert_eq!(body.matches(r#"<button type="button" class="tab-btn"#).count(), 3);
    }

    #[tokio::test]
    async fn test_project_page_fetches_once() {
        struct Counting {
            inner: DirSource,
            fetches: AtomicUsize,
        }

        #[async_trait::async_trait]
        impl ContentSource for Counting {
            fn name(&self) -> &'static str {
                "counting"
            }

            fn locate(&self, content_path: &str) -> crate::Result<String> {
                self.inner.locate(content_path)
            }

            async fn fetch_text(&self, path: &str) -> crate::Result<String> {
                self.fetches.fetch_add(1, Ordering::SeqCst);
                self.inner.fetch_text(path).await
            }
        }

        let (dir, _) = site();
        let mut config = AppConfig::default();
        config.content.root = dir.path().display().to_string();
        let source = Arc::new(Counting {
            inner: DirSource::new(dir.path()),
            fetches: AtomicUsize::new(0),
        });
        let router = create_router(Arc::new(AppState::new(config, source.clone())));

        let (status, body) = get(router, "/project?project=snake-game&tab=css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 4);
        assert!(body.contains(r#"class="tab-btn active" data-tab="css""#));
        assert!(body.contains(r#"<template data-tab="js">const speed = 5;</template>"#));
    }

    #[tokio::test]
    async fn test_project_page_selects_tab() {
        let (_dir, router) = site();
        let (status, body) = get(router, "/project?project=snake-game&tab=js").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("const speed = 5;"));
        assert!(body.contains(r#"class="tab-btn active" data-tab="js""#));
        assert_eq!(body.matches("tab-btn active").count(), 1);
    }

    #[tokio::test]
    async fn test_missing_project_parameter() {
        let (_dir, router) = site();
        let (status, _) = get(router, "/project?title=Nothing").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_snapshot_with_fallbacks() {
        let (_dir, router) = site();
        let (status, body) = get(router, "/api/project?project=react-demo").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Project Details");
        assert_eq!(json["demo_link"], "smallprojects/react-demo/index.html");
        assert_eq!(json["active_tab"], "html");
        assert_eq!(json["code"], "<!-- index.html not found -->");
        assert_eq!(json["files"][1][1]["state"], "not_found");
        assert!(json["documentation"].as_str().unwrap().contains("Status 404"));
    }

    #[tokio::test]
    async fn test_index_lists_projects() {
        let (_dir, router) = site();
        let (status, body) = get(router, "/").await;

        assert_eq!(status, StatusCode::OK);
        let react = body.find("react-demo").unwrap();
        let snake = body.find("snake-game").unwrap();
        assert!(react < snake);
        assert!(body.contains("project?project=snake-game"));
    }

    #[tokio::test]
    async fn test_index_without_content_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.content.root = dir.path().join("missing").display().to_string();
        let source = Arc::new(DirSource::new(dir.path().join("missing")));
        let router = create_router(Arc::new(AppState::new(config, source)));

        let (status, body) = get(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No projects found under smallprojects"));
    }

    #[tokio::test]
    async fn test_demo_files_are_served() {
        let (_dir, router) = site();
        let (status, body) = get(router, "/smallprojects/snake-game/index.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<canvas id=\"board\"></canvas>");
    }
}
