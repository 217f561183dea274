//! HTTP Server for the colsplit API.
//!
//! Provides REST endpoints for CSV upload and per-column pivoting.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | POST   | `/api/pivot`      | Upload CSV, get one fragment per column |
//! | GET    | `/api/logs`       | SSE stream for real-time logs        |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_info, LOG_BROADCASTER};
use super::types::{error_response, PivotResponse};
use crate::config::{parse_bool, AppConfig};
use crate::error::{PipelineError, ServerError, ServerResult};
use crate::models::PivotOptions;
use crate::parser::parse_delimiter;
use crate::transform::pipeline::pivot_bytes;

type ApiError = (StatusCode, Json<Value>);

#[derive(Clone)]
struct AppState {
    config: Arc<AppConfig>,
}

/// Build the application router.
pub fn router(config: AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let body_limit = DefaultBodyLimit::max(config.max_upload_bytes);
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/pivot", post(pivot_upload))
        .route("/api/logs", get(sse_logs))
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: AppConfig) -> ServerResult<()> {
    let port = config.port;
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🚀 colsplit server running on http://localhost:{port}");
    tracing::info!("   POST /api/pivot  - Upload CSV file");
    tracing::info!("   GET  /api/logs   - SSE log stream");
    tracing::info!("   GET  /health     - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "colsplit",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "pivot": "POST /api/pivot",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // Lagged receivers surface as errors; those entries are dropped.
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Fields collected from a `POST /api/pivot` multipart body.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Vec<u8>>,
    file_name: Option<String>,
    key_column: Option<String>,
    delimiter: Option<String>,
    include_key_column: Option<String>,
}

impl UploadForm {
    /// Resolve pivot options, request fields first, config defaults after.
    fn options(&self, config: &AppConfig) -> ServerResult<(PivotOptions, Option<char>)> {
        let mut options = config.pivot_options();

        if let Some(key) = self.key_column.as_deref().map(str::trim) {
            if !key.is_empty() {
                options.key_column = key.to_string();
            }
        }

        if let Some(raw) = self.include_key_column.as_deref().map(str::trim) {
            options.include_key_column = parse_bool(raw).map_err(|_| {
                ServerError::BadRequest(format!("includeKeyColumn must be a boolean, got '{raw}'"))
            })?;
        }

        let delimiter = match self.delimiter.as_deref().filter(|d| !d.is_empty()) {
            None => None,
            Some(raw) => Some(parse_delimiter(raw).ok_or_else(|| {
                ServerError::BadRequest(format!("Unsupported delimiter '{raw}'"))
            })?),
        };

        Ok((options, delimiter))
    }
}

/// Map a server error to its HTTP status.
fn status_for(err: &ServerError) -> StatusCode {
    match err {
        ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServerError::Pipeline(PipelineError::Csv(_) | PipelineError::UnknownColumn { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ServerError::Pipeline(_) | ServerError::Internal(_) | ServerError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn api_error(err: ServerError) -> ApiError {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!("❌ {err}");
    } else {
        tracing::warn!("{err}");
    }
    (status, Json(error_response(&err.to_string())))
}

async fn read_form(mut multipart: Multipart) -> ServerResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            form.file_name = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {e}")))?;
            form.file = Some(bytes.to_vec());
            continue;
        }

        let slot = match name.as_str() {
            "keyColumn" => &mut form.key_column,
            "delimiter" => &mut form.delimiter,
            "includeKeyColumn" => &mut form.include_key_column,
            _ => continue,
        };
        *slot = Some(
            field
                .text()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {e}")))?,
        );
    }

    Ok(form)
}

/// Upload CSV endpoint
async fn pivot_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PivotResponse>, ApiError> {
    let form = read_form(multipart).await.map_err(api_error)?;
    let (options, delimiter) = form.options(&state.config).map_err(api_error)?;

    let UploadForm {
        file, file_name, ..
    } = form;
    let bytes = file.ok_or_else(|| api_error(ServerError::BadRequest("No file provided".into())))?;

    log_info(format!(
        "📄 New upload: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    ));

    let result = tokio::task::spawn_blocking(move || pivot_bytes(&bytes, &options, delimiter))
        .await
        .map_err(|e| api_error(ServerError::Internal(e.to_string())))?
        .map_err(|e| api_error(e.into()))?;

    tracing::info!(
        rows = result.csv_info.row_count,
        columns = result.fragments.len(),
        "upload pivoted"
    );

    Ok(Json(PivotResponse::from_result(result, file_name)))
}
