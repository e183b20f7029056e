use std::sync::Arc;

use shared::{
    domain::Repository,
    error::{ApiError, ErrorCode},
    protocol::CreateRepositoryRequest,
};
use tracing::info;

pub mod http;
pub mod store;

pub use http::build_router;
pub use store::RepositoryStore;

#[derive(Clone, Default)]
pub struct ApiContext {
    pub store: Arc<RepositoryStore>,
}

impl ApiContext {
    pub fn new(store: RepositoryStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub async fn list_repositories(ctx: &ApiContext) -> Result<Vec<Repository>, ApiError> {
    Ok(ctx.store.list().await)
}

pub async fn create_repository(
    ctx: &ApiContext,
    request: CreateRepositoryRequest,
) -> Result<Repository, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::new(ErrorCode::Validation, "title must not be empty"));
    }
    let repository = ctx.store.create(request).await;
    info!(id = %repository.id, "repository created");
    Ok(repository)
}

pub async fn like_repository(ctx: &ApiContext, id: &str) -> Result<Repository, ApiError> {
    let repository = ctx.store.like(id).await?;
    info!(%id, likes = repository.likes, "repository liked");
    Ok(repository)
}

pub async fn delete_repository(ctx: &ApiContext, id: &str) -> Result<(), ApiError> {
    ctx.store.delete(id).await?;
    info!(%id, "repository deleted");
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
