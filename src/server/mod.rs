//! HTTP API: axum routes over a loaded [`DocumentStore`].
//!
//! | Route                                   | Response                               |
//! |-----------------------------------------|----------------------------------------|
//! | `GET /api/post_search/?query=<text>`    | matching posts, in store order         |
//! | `GET /api/comment_search/?query=<text>` | matching comments, in store order      |
//! | `GET /api/explain/?query=<text>`        | parsed query and compiled operations   |
//! | `GET /api/health`                       | collection sizes                       |
//!
//! Every search route also answers without the trailing slash. A missing
//! `query` argument is a `400` with code `missing_query`; an empty one is a
//! valid query that matches everything. When `query` is repeated the last
//! value wins. A query string axum cannot decode is a `400` with code
//! `invalid_query`, in the same error envelope.

mod error;

pub use error::{ApiError, ApiErrorBody, ApiErrorResponse};

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use quarry_core::{
    parse, require_query, Compiler, Document, DocumentKind, DocumentStore, Operation, ParsedQuery,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

/// State shared read-only by every request.
#[derive(Debug)]
pub struct AppState {
    pub store: DocumentStore,
    pub compiler: Compiler,
}

impl AppState {
    pub fn new(store: DocumentStore, compiler: Compiler) -> Arc<Self> {
        Arc::new(Self { store, compiler })
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: Option<String>,
}

impl SearchParams {
    /// Pick `query` out of the raw argument pairs; the last occurrence wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            query: pairs
                .into_iter()
                .rev()
                .find(|(key, _)| key == "query")
                .map(|(_, value)| value),
        }
    }
}

/// Query-string extraction result as the handlers receive it.
type RawParams = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn search_params(raw: RawParams) -> Result<SearchParams, ApiError> {
    let Query(pairs) = raw?;
    Ok(SearchParams::from_pairs(pairs))
}

#[derive(Debug, Serialize)]
pub struct Explanation {
    pub parsed: ParsedQuery,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub posts: usize,
    pub comments: usize,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/post_search", get(post_search))
        .route("/api/post_search/", get(post_search))
        .route("/api/comment_search", get(comment_search))
        .route("/api/comment_search/", get(comment_search))
        .route("/api/explain", get(explain))
        .route("/api/explain/", get(explain))
        .route("/api/health", get(health))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "search api listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn post_search(
    State(state): State<Arc<AppState>>,
    params: RawParams,
) -> Result<Json<Vec<Document>>, ApiError> {
    run_search(&state, DocumentKind::Post, &search_params(params)?)
}

async fn comment_search(
    State(state): State<Arc<AppState>>,
    params: RawParams,
) -> Result<Json<Vec<Document>>, ApiError> {
    run_search(&state, DocumentKind::Comment, &search_params(params)?)
}

fn run_search(
    state: &AppState,
    kind: DocumentKind,
    params: &SearchParams,
) -> Result<Json<Vec<Document>>, ApiError> {
    let query = require_query(params.query.as_deref())?;
    let ops = state.compiler.compile(&parse(query));
    let hits: Vec<Document> = state.store.search(kind, &ops).into_iter().cloned().collect();
    tracing::info!(%kind, query, hits = hits.len(), "search");
    Ok(Json(hits))
}

async fn explain(
    State(state): State<Arc<AppState>>,
    params: RawParams,
) -> Result<Json<Explanation>, ApiError> {
    let params = search_params(params)?;
    let query = require_query(params.query.as_deref())?;
    let parsed = parse(query);
    let operations = state.compiler.compile(&parsed);
    Ok(Json(Explanation { parsed, operations }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        ok: true,
        posts: state.store.len(DocumentKind::Post),
        comments: state.store.len(DocumentKind::Comment),
    })
}
