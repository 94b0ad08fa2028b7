//! Decimator server API

use crate::app_state::{AppState, SharedAppState};
use crate::cli::CommandLineArgs;
use crate::curves::reduce_curves;
use crate::error::DecimatorError;
use crate::metrics::{
    metrics_handler, record_read_metrics, record_response_metrics, request_counter,
};
use crate::models::{
    CatalogEntry, CountResponse, CurveReadRequest, CurveResponse, FileFormat, TraceReadRequest,
    TraceResponse,
};
use crate::traces::reduce_traces;
use crate::validated_json::ValidatedJson;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// `axum::Router` wrapped by a trailing slash normaliser.
pub type Service = NormalizePath<Router>;

/// Application initialisation
///
/// Sizes the global Rayon thread pool when Rayon is in use.
///
/// # Arguments
///
/// * `args`: Command line arguments
pub fn init(args: &CommandLineArgs) {
    if let (true, Some(thread_limit)) = (args.use_rayon, args.thread_limit) {
        if let Err(err) = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_limit)
            .build_global()
        {
            tracing::warn!("failed to configure Rayon thread pool: {}", err);
        }
    }
}

/// Returns a [crate::app::Service] for the decimator server API using the built-in readers.
///
/// # Arguments
///
/// * `args`: Command line arguments
pub fn service(args: &CommandLineArgs) -> Service {
    service_with_state(Arc::new(AppState::new(args)))
}

/// Returns a [crate::app::Service] for the decimator server API.
///
/// # Arguments
///
/// * `state`: Shared application state, holding the catalogs and readers
pub fn service_with_state(state: SharedAppState) -> Service {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Returns a [axum::Router] for the decimator server API.
fn router(state: SharedAppState) -> Router {
    fn las() -> Router<SharedAppState> {
        Router::new()
            .route("/list", get(list_las))
            .route("/list/:name", get(entry_las))
            .route("/count", get(count_las))
            .route("/read", post(read_las))
    }

    fn segy() -> Router<SharedAppState> {
        Router::new()
            .route("/list", get(list_segy))
            .route("/list/:name", get(entry_segy))
            .route("/count", get(count_segy))
            .route("/read", post(read_segy))
    }

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/seismic-data/las", las())
        .nest("/api/seismic-data/segy", segy())
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .on_request(request_counter)
                .on_response(record_response_metrics),
        )
}

/// Service name and version
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Seismic Data API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness check
async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn list(
    state: &AppState,
    format: FileFormat,
) -> Result<Json<Vec<CatalogEntry>>, DecimatorError> {
    Ok(Json(state.catalog(format).list().await?))
}

async fn entry(
    state: &AppState,
    format: FileFormat,
    name: &str,
) -> Result<Json<CatalogEntry>, DecimatorError> {
    Ok(Json(state.catalog(format).lookup(name).await?))
}

async fn count(
    state: &AppState,
    format: FileFormat,
) -> Result<Json<CountResponse>, DecimatorError> {
    let count = state.catalog(format).list().await?.len();
    Ok(Json(CountResponse { count }))
}

async fn list_las(
    State(state): State<SharedAppState>,
) -> Result<Json<Vec<CatalogEntry>>, DecimatorError> {
    list(&state, FileFormat::Las).await
}

async fn list_segy(
    State(state): State<SharedAppState>,
) -> Result<Json<Vec<CatalogEntry>>, DecimatorError> {
    list(&state, FileFormat::Segy).await
}

async fn entry_las(
    State(state): State<SharedAppState>,
    Path(name): Path<String>,
) -> Result<Json<CatalogEntry>, DecimatorError> {
    entry(&state, FileFormat::Las, &name).await
}

async fn entry_segy(
    State(state): State<SharedAppState>,
    Path(name): Path<String>,
) -> Result<Json<CatalogEntry>, DecimatorError> {
    entry(&state, FileFormat::Segy, &name).await
}

async fn count_las(
    State(state): State<SharedAppState>,
) -> Result<Json<CountResponse>, DecimatorError> {
    count(&state, FileFormat::Las).await
}

async fn count_segy(
    State(state): State<SharedAppState>,
) -> Result<Json<CountResponse>, DecimatorError> {
    count(&state, FileFormat::Segy).await
}

/// Run a CPU-bound read off the async runtime, on Rayon or the Tokio blocking pool.
///
/// # Arguments
///
/// * `use_rayon`: Whether to run the task on the Rayon thread pool
/// * `task`: The task to run
async fn run_blocking<F, T>(use_rayon: bool, task: F) -> Result<T, DecimatorError>
where
    F: FnOnce() -> Result<T, DecimatorError> + Send + 'static,
    T: Send + 'static,
{
    if use_rayon {
        tokio_rayon::spawn(task).await
    } else {
        tokio::task::spawn_blocking(task).await?
    }
}

/// Handler for LAS read requests
///
/// Checks the catalog and the data directory, then reads, decimates and formats the curves of the
/// requested file.
#[tracing::instrument(skip(state))]
async fn read_las(
    State(state): State<SharedAppState>,
    ValidatedJson(request): ValidatedJson<CurveReadRequest>,
) -> Result<Json<CurveResponse>, DecimatorError> {
    let format = FileFormat::Las;
    let reader = state
        .curve_reader
        .clone()
        .ok_or(DecimatorError::ReaderUnavailable { format })?;
    let catalog = state.catalog(format);
    let info = catalog.lookup(&request.filename).await?;
    let path = catalog.file_path(&request.filename).await?;

    let _task_permit = state.resource_manager.task().await?;
    let start = Instant::now();
    let response = run_blocking(state.args.use_rayon, move || {
        let curve_set = reader
            .read_curves(&path)
            .map_err(|source| DecimatorError::Read {
                format,
                filename: request.filename.clone(),
                source,
            })?;
        reduce_curves(info, &curve_set, &request)
    })
    .await?;

    let values = response.headers.len() * (response.data.len() + 1);
    record_read_metrics(format, start.elapsed(), values);
    Ok(Json(response))
}

/// Handler for SEG-Y read requests
///
/// Checks the catalog and the data directory, then reads, decimates and formats the traces of the
/// requested file.
#[tracing::instrument(skip(state))]
async fn read_segy(
    State(state): State<SharedAppState>,
    ValidatedJson(request): ValidatedJson<TraceReadRequest>,
) -> Result<Json<TraceResponse>, DecimatorError> {
    let format = FileFormat::Segy;
    let reader = state
        .trace_reader
        .clone()
        .ok_or(DecimatorError::ReaderUnavailable { format })?;
    let catalog = state.catalog(format);
    let info = catalog.lookup(&request.filename).await?;
    let path = catalog.file_path(&request.filename).await?;

    let _task_permit = state.resource_manager.task().await?;
    let start = Instant::now();
    let response = run_blocking(state.args.use_rayon, move || {
        let traces = reader
            .read_traces(&path)
            .map_err(|source| DecimatorError::Read {
                format,
                filename: request.filename.clone(),
                source,
            })?;
        reduce_traces(info, &traces, &request)
    })
    .await?;

    let values = response.data.iter().map(Vec::len).sum();
    record_read_metrics(format, start.elapsed(), values);
    Ok(Json(response))
}
