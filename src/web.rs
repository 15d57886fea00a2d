//! Web server for the booster tracking page
//!
//! Players upload their client log; the server answers with the contents of
//! every booster opened in it.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::catalog::CatalogIndex;
use crate::error::Result;
use crate::extraction::find_boosters;
use crate::reports::{booster_contents, format_boosters};

/// Largest accepted log upload
pub const MAX_LOG_SIZE: usize = 100 << 20;

/// Multipart field holding the uploaded log
const LOG_FIELD: &str = "mtgalogs";

/// Shared application state (read-only catalog + landing page)
#[derive(Clone)]
struct AppState {
    catalog: Arc<CatalogIndex>,
    landing_page: Bytes,
    json_format: bool,
}

async fn read_log_field(multipart: &mut Multipart) -> std::result::Result<Option<Bytes>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(LOG_FIELD) {
            return Ok(Some(field.bytes().await?));
        }
    }
    Ok(None)
}

/// POST /upload - multipart form with the client log in field `mtgalogs`
async fn upload_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let log_bytes = match read_log_field(&mut multipart).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            log::warn!("Upload without a {} field", LOG_FIELD);
            return (
                StatusCode::PRECONDITION_FAILED,
                "Could not retrieve mtg logs file",
            )
                .into_response();
        }
        Err(e) => {
            log::warn!("Could not parse multipart form: {}", e);
            return (StatusCode::PRECONDITION_FAILED, "Invalid Request").into_response();
        }
    };

    log::info!("Received log upload of {} bytes", log_bytes.len());

    let parsed = tokio::task::spawn_blocking(move || find_boosters(&log_bytes[..])).await;
    let boosters = match parsed {
        Ok(Ok(boosters)) => boosters,
        Err(e) => {
            log::error!("Log parsing task failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
        Ok(Err(e)) => {
            log::warn!("Failed to parse uploaded mtga logs: {}", e);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Could not parse mtg logs: {}", e),
            )
                .into_response();
        }
    };

    if state.json_format {
        Json(booster_contents(&boosters, &state.catalog)).into_response()
    } else {
        (
            [(header::CONTENT_TYPE, "text/plain")],
            format_boosters(&boosters, &state.catalog),
        )
            .into_response()
    }
}

/// GET /boostertracking - the landing page with the upload form
async fn landing_handler(State(state): State<AppState>) -> Html<Bytes> {
    Html(state.landing_page.clone())
}

/// Build the web server router
pub fn create_router(catalog: Arc<CatalogIndex>, landing_page: Bytes, json_format: bool) -> Router {
    let state = AppState {
        catalog,
        landing_page,
        json_format,
    };

    Router::new()
        .route("/upload", post(upload_handler))
        .route("/boostertracking", get(landing_handler))
        .layer(DefaultBodyLimit::max(MAX_LOG_SIZE))
        .with_state(state)
}

/// Serve `router` on localhost until the process is stopped
pub async fn serve(router: Router, port: u16) -> Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    log::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
