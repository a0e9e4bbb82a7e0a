//! HTTP server: post index, post details and static files

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::loader::validate_id;
use crate::content::PostMetadata;
use crate::templates::TemplateRenderer;
use crate::{Blog, BlogError};

/// Server state
pub struct AppState {
    blog: Arc<Blog>,
    renderer: TemplateRenderer,
}

impl AppState {
    pub fn new(blog: Blog) -> Result<Self> {
        Ok(Self {
            blog: Arc::new(blog),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Run a blocking load on the blocking pool, bounded by `read_timeout_ms`
    ///
    /// Returns `None` when the load times out or the task dies; the caller
    /// degrades to an empty result.
    async fn load<T, F>(&self, what: &str, f: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&Blog) -> T + Send + 'static,
    {
        let blog = Arc::clone(&self.blog);
        let limit = Duration::from_millis(self.blog.config.read_timeout_ms);
        let task = tokio::task::spawn_blocking(move || f(&blog));

        match tokio::time::timeout(limit, task).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                tracing::error!("Loading {} failed: {}", what, e);
                None
            }
            Err(_) => {
                tracing::warn!("Loading {} timed out after {:?}", what, limit);
                None
            }
        }
    }
}

/// Build the application router
pub fn router(blog: Blog) -> Result<Router> {
    let static_dir = blog.static_dir.clone();
    let state = Arc::new(AppState::new(blog)?);

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/Blog", get(index_handler))
        .route("/Blog/Index", get(index_handler))
        .route("/Blog/Details", get(missing_id_handler))
        .route("/Blog/Details/:id", get(details_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog.clone())?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");
    tracing::debug!("Serving posts from {:?}", blog.post_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Post listing
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let ids = state
        .load("index ids", |blog| blog.loader().index_ids())
        .await
        .unwrap_or_default();

    let mut posts = Vec::with_capacity(ids.len());
    for id in ids {
        let post = match state
            .load("post metadata", move |blog| blog.loader().load_metadata(id))
            .await
        {
            Some(post) => post,
            None => PostMetadata::empty(id, state.blog.loader().published_at()),
        };
        posts.push(post);
    }

    render(state.renderer.render_index(&state.blog.config, &posts))
}

/// Single post page
async fn details_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let loaded = state
        .load("post details", move |blog| blog.loader().load_post(i64::from(id)))
        .await
        .unwrap_or(Err(BlogError::NotFound(id)));

    match loaded {
        Ok((post, body)) => render(
            state
                .renderer
                .render_details(&state.blog.config, &post, &body),
        ),
        Err(e) => e.into_response(),
    }
}

/// `/Blog/Details` without an id
async fn missing_id_handler() -> Response {
    BlogError::InvalidId(0).into_response()
}

/// Parse and validate an id from the request path
fn parse_id(raw: &str) -> Result<u32, BlogError> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| BlogError::MalformedId(raw.to_string()))?;
    validate_id(id)
}

fn render(result: Result<String>) -> Response {
    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
