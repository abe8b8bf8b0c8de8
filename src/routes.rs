use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{any, get, post},
    Json,
    Router,
};
use blob_store::BlobStorage;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::ServerConfig,
    http_objects::{FilegateAPIError, UploadFile},
    middleware::InstanceRequestSpan,
};

mod download;
mod files;
mod upload;
use download::download_file;
use files::list_files;
use upload::upload_file;

#[derive(OpenApi)]
#[openapi(
        paths(
            health,
            upload::upload_file,
            files::list_files,
            download::download_file,
        ),
        components(
            schemas(
                FilegateAPIError,
                UploadFile,
            )
        ),
        tags(
            (name = "filegate", description = "Filegate API")
        )
    )]
pub struct ApiDoc;

#[derive(Clone)]
pub struct RouteState {
    pub blob_storage: Arc<BlobStorage>,
}

pub fn create_routes(route_state: RouteState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/docs/openapi.json", get(openapi_json))
        .route("/health", any(health))
        .route("/upload", post(upload_file))
        .route("/files", get(list_files))
        .route("/download", any(missing_filename))
        .route("/download/", any(missing_filename))
        .route("/download/{name}", get(download_file))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(InstanceRequestSpan::new(&config.env, &config.instance_id())),
        )
        .layer(cors)
        .with_state(route_state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    tag = "operations",
    responses(
        (status = 200, description = "Server is up", body = String, content_type = "text/plain"),
    ),
)]
async fn health() -> &'static str {
    "OK\n"
}

async fn missing_filename() -> FilegateAPIError {
    FilegateAPIError::bad_request("Missing filename")
}
