use shared::{
    domain::{Repository, RepositoryId},
    error::{ApiException, ErrorCode},
    protocol::CreateRepositoryRequest,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory repository table. Insertion order is the listing order.
#[derive(Debug, Default)]
pub struct RepositoryStore {
    records: RwLock<Vec<Repository>>,
}

impl RepositoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Repository>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn list(&self) -> Vec<Repository> {
        self.records.read().await.clone()
    }

    pub async fn create(&self, request: CreateRepositoryRequest) -> Repository {
        let repository = Repository {
            id: RepositoryId::Text(Uuid::new_v4().to_string()),
            title: request.title,
            url: request.url,
            techs: request.techs,
            likes: 0,
        };
        self.records.write().await.push(repository.clone());
        repository
    }

    /// Increments under the write lock so concurrent likes are never lost.
    pub async fn like(&self, id: &str) -> Result<Repository, ApiException> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|repository| matches_id(&repository.id, id))
            .ok_or_else(|| missing(id))?;
        record.likes += 1;
        Ok(record.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiException> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|repository| !matches_id(&repository.id, id));
        if records.len() == before {
            return Err(missing(id));
        }
        Ok(())
    }
}

/// Path ids arrive as text; compare against the id's wire rendering.
fn matches_id(id: &RepositoryId, raw: &str) -> bool {
    match id {
        RepositoryId::Text(value) => value == raw,
        RepositoryId::Number(value) => raw.parse::<i64>().is_ok_and(|raw| raw == *value),
    }
}

fn missing(id: &str) -> ApiException {
    ApiException::new(ErrorCode::NotFound, format!("repository {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str) -> CreateRepositoryRequest {
        CreateRepositoryRequest {
            title: title.to_string(),
            url: format!("https://github.com/example/{title}"),
            techs: vec!["Rust".into()],
        }
    }

    #[tokio::test]
    async fn create_assigns_fresh_text_ids_and_zero_likes() {
        let store = RepositoryStore::new();
        let a = store.create(request("a")).await;
        let b = store.create(request("b")).await;

        assert_ne!(a.id, b.id);
        assert!(matches!(a.id, RepositoryId::Text(_)));
        assert_eq!(a.likes, 0);
        assert_eq!(store.list().await, vec![a, b]);
    }

    #[tokio::test]
    async fn like_increments_and_returns_full_record() {
        let store = RepositoryStore::new();
        let created = store.create(request("a")).await;
        let id = created.id.to_string();

        store.like(&id).await.expect("first like");
        let liked = store.like(&id).await.expect("second like");
        assert_eq!(liked.likes, 2);
        assert_eq!(liked.title, created.title);
    }

    #[tokio::test]
    async fn numeric_ids_match_their_path_form() {
        let store = RepositoryStore::with_records(vec![Repository {
            id: RepositoryId::Number(1),
            title: "A".into(),
            url: String::new(),
            techs: Vec::new(),
            likes: 0,
        }]);

        assert_eq!(store.like("1").await.expect("like").likes, 1);
        assert!(store.like("01x").await.is_err());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let store = RepositoryStore::new();
        let created = store.create(request("a")).await;

        let err = store.delete("nope").await.expect_err("unknown");
        assert!(matches!(err.code, ErrorCode::NotFound));

        store.delete(&created.id.to_string()).await.expect("delete");
        assert!(store.list().await.is_empty());
        assert!(store.delete(&created.id.to_string()).await.is_err());
    }
}
