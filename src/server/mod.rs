//! Preview host - serves the wizard to a local browser

use anyhow::{Context, Result};
use axum::{
    extract::{Path as UrlPath, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::helpers::html_escape;
use crate::marker::Marker;
use crate::wizard::{Wizard, ASSET_PREFIX};

const INDEX_HTML: &str = include_str!("../../frontend/index.html");
const MAIN_JS: &str = include_str!("../../frontend/main.js");

/// Server state
struct ServerState {
    wizard: Wizard,
    marker: Option<Marker>,
    shutdown: Notify,
}

#[derive(Debug, Serialize)]
struct Settings<'a> {
    title: &'a str,
    theme: &'a str,
    accent_color: &'a str,
    help_url: &'a str,
}

/// Serve the wizard until it is completed, dismissed or interrupted
pub async fn start(
    wizard: Wizard,
    pages_dir: &Path,
    marker: Option<Marker>,
    ip: &str,
    port: u16,
    open: bool,
) -> Result<()> {
    let state = Arc::new(ServerState {
        wizard,
        marker,
        shutdown: Notify::new(),
    });
    let app = router(Arc::clone(&state), pages_dir);

    // "localhost" is not a parseable IP
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port)
        .parse()
        .with_context(|| format!("invalid address {}:{}", ip, port))?;

    let url = format!("http://{}:{}", ip, port);
    println!("Wizard running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = state.shutdown.notified() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupted, shutting down");
                }
            }
        })
        .await?;

    Ok(())
}

fn router(state: Arc<ServerState>, pages_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/main.js", get(script_handler))
        .route("/api/pages", get(pages_handler))
        .route("/api/pages/:index", get(page_html_handler))
        .route("/api/final", get(final_handler))
        .route("/api/brand", get(brand_handler))
        .route("/api/settings", get(settings_handler))
        .route("/api/help", get(help_handler))
        .route("/api/complete", post(complete_handler))
        .route("/api/dismiss", post(dismiss_handler))
        .nest_service(ASSET_PREFIX, ServeDir::new(pages_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    Html(INDEX_HTML.replace("{{title}}", &html_escape(state.wizard.title())))
}

async fn script_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], MAIN_JS)
}

async fn pages_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.wizard.page_infos())
}

async fn page_html_handler(
    State(state): State<Arc<ServerState>>,
    UrlPath(index): UrlPath<usize>,
) -> Response {
    match state.wizard.page_html(index) {
        Some(html) => Html(html.to_string()).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

async fn final_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    Html(state.wizard.final_html().to_string())
}

async fn brand_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.wizard.brand().clone())
}

async fn settings_handler(State(state): State<Arc<ServerState>>) -> Response {
    let wizard = &state.wizard;
    Json(Settings {
        title: wizard.title(),
        theme: wizard.theme(),
        accent_color: wizard.accent_color(),
        help_url: wizard.help_url(),
    })
    .into_response()
}

async fn help_handler(State(state): State<Arc<ServerState>>) -> Response {
    if state.wizard.help_url().is_empty() {
        return (StatusCode::NOT_FOUND, "No help URL configured").into_response();
    }
    match state.wizard.allowed_help_url() {
        Some(url) => Redirect::temporary(url).into_response(),
        None => (StatusCode::FORBIDDEN, "Blocked URL").into_response(),
    }
}

async fn complete_handler(State(state): State<Arc<ServerState>>) -> StatusCode {
    match &state.marker {
        Some(marker) => {
            if let Err(e) = state.wizard.complete(marker) {
                tracing::error!("write marker: {:#}", e);
            }
        }
        None => tracing::warn!("no marker location, completion not recorded"),
    }
    state.shutdown.notify_one();
    StatusCode::NO_CONTENT
}

async fn dismiss_handler(State(state): State<Arc<ServerState>>) -> StatusCode {
    state.wizard.dismiss();
    state.shutdown.notify_one();
    StatusCode::NO_CONTENT
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("rundll32")
            .args(["url.dll,FileProtocolHandler", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{FrontMatter, MarkdownRenderer, Page};
    use crate::wizard::WizardConfig;
    use tempfile::TempDir;

    fn wizard(site: SiteConfig) -> Wizard {
        let pages = vec![Page {
            frontmatter: FrontMatter {
                title: "Welcome".to_string(),
                ..Default::default()
            },
            markdown: "# Hello\n\n![logo](logo.png)".to_string(),
            source_file: "welcome.md".to_string(),
        }];
        let config = WizardConfig::from_site(&site, Some("# Done".to_string()));
        Wizard::new(pages, config, &MarkdownRenderer::new())
    }

    fn state(dir: &TempDir, site: SiteConfig) -> Arc<ServerState> {
        Arc::new(ServerState {
            wizard: wizard(site),
            marker: Some(Marker::new(dir.path().join("day1").join(".completed"))),
            shutdown: Notify::new(),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_page_html_in_and_out_of_range() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, SiteConfig::default());

        let response = page_html_handler(State(Arc::clone(&state)), UrlPath(0)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("<h1>Hello</h1>"));
        assert!(body.contains(r#"src="/pages/logo.png""#));

        let response = page_html_handler(State(state), UrlPath(5)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_settings_apply_defaults() {
        let dir = TempDir::new().unwrap();
        let response = settings_handler(State(state(&dir, SiteConfig::default()))).await;
        let body = body_text(response).await;
        let settings: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(settings["title"], "Day 1");
        assert_eq!(settings["theme"], "auto");
        assert_eq!(settings["help_url"], "");
    }

    #[tokio::test]
    async fn test_index_uses_title() {
        let dir = TempDir::new().unwrap();
        let site = SiteConfig {
            title: "Acme <Onboarding>".to_string(),
            ..Default::default()
        };
        let Html(html) = index_handler(State(state(&dir, site))).await;
        assert!(html.contains("Acme &lt;Onboarding&gt;"));
        assert!(!html.contains("{{title}}"));
    }

    #[tokio::test]
    async fn test_help_redirect_and_block() {
        let dir = TempDir::new().unwrap();

        let response = help_handler(State(state(&dir, SiteConfig::default()))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let site = SiteConfig {
            help_url: "https://help.acme.com".to_string(),
            ..Default::default()
        };
        let response = help_handler(State(state(&dir, site))).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://help.acme.com"
        );

        let site = SiteConfig {
            help_url: "file:///etc/passwd".to_string(),
            ..Default::default()
        };
        let response = help_handler(State(state(&dir, site))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_complete_writes_marker_and_signals_shutdown() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, SiteConfig::default());

        let status = complete_handler(State(Arc::clone(&state))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.marker.as_ref().unwrap().exists().unwrap());
        // notify_one stores a permit, so this resolves immediately
        state.shutdown.notified().await;
    }

    #[tokio::test]
    async fn test_complete_without_marker_location_still_shuts_down() {
        let state = Arc::new(ServerState {
            wizard: wizard(SiteConfig::default()),
            marker: None,
            shutdown: Notify::new(),
        });

        let status = complete_handler(State(Arc::clone(&state))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        state.shutdown.notified().await;
    }

    #[tokio::test]
    async fn test_dismiss_does_not_write_marker() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, SiteConfig::default());

        let status = dismiss_handler(State(Arc::clone(&state))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(!state.marker.as_ref().unwrap().exists().unwrap());
    }

    #[tokio::test]
    async fn test_final_page() {
        let dir = TempDir::new().unwrap();
        let Html(html) = final_handler(State(state(&dir, SiteConfig::default()))).await;
        assert!(html.contains("<h1>Done</h1>"));
    }
}
