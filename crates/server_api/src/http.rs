//! Axum routes for the repositories service.

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use shared::{
    domain::Repository,
    error::{ApiError, ErrorCode},
    protocol::CreateRepositoryRequest,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    create_repository, delete_repository, like_repository, list_repositories, ApiContext,
};

pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub fn build_router(ctx: ApiContext, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/repositories",
            get(http_list_repositories).post(http_create_repository),
        )
        .route("/repositories/:id", delete(http_delete_repository))
        .route("/repositories/:id/like", post(http_like_repository))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_repositories(
    State(ctx): State<ApiContext>,
) -> ApiResult<Json<Vec<Repository>>> {
    let repositories = list_repositories(&ctx).await.map_err(into_response)?;
    Ok(Json(repositories))
}

async fn http_create_repository(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateRepositoryRequest>,
) -> ApiResult<Json<Repository>> {
    let repository = create_repository(&ctx, req).await.map_err(into_response)?;
    Ok(Json(repository))
}

async fn http_like_repository(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Repository>> {
    let repository = like_repository(&ctx, &id).await.map_err(into_response)?;
    Ok(Json(repository))
}

async fn http_delete_repository(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    delete_repository(&ctx, &id).await.map_err(into_response)?;
    Ok(StatusCode::NO_CONTENT)
}

fn into_response(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
