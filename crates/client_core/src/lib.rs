use std::{fmt, sync::Arc};

use shared::{
    domain::{Repository, RepositoryId},
    protocol::CreateRepositoryRequest,
};
use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod reconcile;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use error::TransportError;
pub use transport::{ApiClient, RepositoryApi};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Immutable view of the collection at one publish. `version` is 0 for the
/// initial empty value and grows by one per successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSnapshot {
    pub version: u64,
    pub repositories: Arc<[Repository]>,
}

impl Default for CollectionSnapshot {
    fn default() -> Self {
        Self {
            version: 0,
            repositories: Arc::from(Vec::new()),
        }
    }
}

impl CollectionSnapshot {
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    pub fn get(&self, id: &RepositoryId) -> Option<&Repository> {
        self.repositories.iter().find(|repository| &repository.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Repository> {
        self.repositories.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOperation {
    Load,
    Add,
    Like,
    Remove,
}

impl fmt::Display for ListOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "load",
            Self::Add => "add",
            Self::Like => "like",
            Self::Remove => "remove",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Loaded { count: usize },
    Added { repository: Repository },
    Liked { repository: Repository },
    /// The server counted the like but the record was no longer in the local
    /// collection, so the returned value was not inserted.
    LikeDiscarded { repository: Repository },
    Removed { id: RepositoryId, removed: usize },
    OperationFailed { operation: ListOperation, message: String },
}

/// Owner of the local repository collection.
///
/// Each operation issues exactly one API call and holds no lock while waiting
/// for it. On resume the new value is derived from the latest published
/// snapshot, so concurrent operations apply in completion order: a `like`
/// that completes after a `remove` of the same id finds nothing to replace.
pub struct ListController {
    api: Arc<dyn RepositoryApi>,
    snapshots: watch::Sender<CollectionSnapshot>,
    events: broadcast::Sender<ListEvent>,
}

impl ListController {
    pub fn new(api: Arc<dyn RepositoryApi>) -> Arc<Self> {
        let (snapshots, _) = watch::channel(CollectionSnapshot::default());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            api,
            snapshots,
            events,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Arc<Self>, TransportError> {
        let api = ApiClient::from_settings(settings)?;
        Ok(Self::new(Arc::new(api)))
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Yields the current snapshot first, then every later publish. Slow
    /// consumers skip straight to the newest value.
    pub fn snapshots(&self) -> WatchStream<CollectionSnapshot> {
        WatchStream::new(self.snapshots.subscribe())
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ListEvent> {
        self.events.subscribe()
    }

    pub async fn load(&self) -> Result<CollectionSnapshot, TransportError> {
        let received = self
            .api
            .list()
            .await
            .map_err(|err| self.failed(ListOperation::Load, err))?;

        let count = received.len();
        let (snapshot, ()) = self.publish(|_| (reconcile::replace_all(received), ()));
        info!(count, version = snapshot.version, "repositories loaded");
        self.emit(ListEvent::Loaded { count });
        Ok(snapshot)
    }

    pub async fn add(
        &self,
        title: impl Into<String>,
        url: impl Into<String>,
        techs: Vec<String>,
    ) -> Result<Repository, TransportError> {
        let request = CreateRepositoryRequest {
            title: title.into(),
            url: url.into(),
            techs,
        };
        let created = self
            .api
            .create(&request)
            .await
            .map_err(|err| self.failed(ListOperation::Add, err))?;

        let (snapshot, ()) =
            self.publish(|current| (reconcile::append(current, created.clone()), ()));
        info!(id = %created.id, version = snapshot.version, "repository added");
        self.emit(ListEvent::Added {
            repository: created.clone(),
        });
        Ok(created)
    }

    /// Returns the server's updated record even when it could not be applied
    /// locally; see [`ListEvent::LikeDiscarded`].
    pub async fn like(&self, id: &RepositoryId) -> Result<Repository, TransportError> {
        let liked = self
            .api
            .like(id)
            .await
            .map_err(|err| self.failed(ListOperation::Like, err))?;

        let (snapshot, replaced) =
            self.publish(|current| reconcile::replace_by_id(current, &liked));
        if replaced {
            info!(
                id = %liked.id,
                likes = liked.likes,
                version = snapshot.version,
                "repository liked"
            );
            self.emit(ListEvent::Liked {
                repository: liked.clone(),
            });
        } else {
            warn!(
                id = %liked.id,
                likes = liked.likes,
                "like acknowledged for a repository missing from the local collection; dropping it"
            );
            self.emit(ListEvent::LikeDiscarded {
                repository: liked.clone(),
            });
        }
        Ok(liked)
    }

    /// Returns how many local elements were removed (0 or 1 while ids are
    /// unique).
    pub async fn remove(&self, id: &RepositoryId) -> Result<usize, TransportError> {
        self.api
            .delete(id)
            .await
            .map_err(|err| self.failed(ListOperation::Remove, err))?;

        let (snapshot, removed) = self.publish(|current| reconcile::remove_by_id(current, id));
        info!(%id, removed, version = snapshot.version, "repository removed");
        self.emit(ListEvent::Removed {
            id: id.clone(),
            removed,
        });
        Ok(removed)
    }

    fn publish<R: Default>(
        &self,
        derive: impl FnOnce(&[Repository]) -> (Vec<Repository>, R),
    ) -> (CollectionSnapshot, R) {
        let mut published = CollectionSnapshot::default();
        let mut outcome = R::default();
        self.snapshots.send_modify(|snapshot| {
            let (next, result) = derive(&snapshot.repositories[..]);
            snapshot.version += 1;
            snapshot.repositories = next.into();
            published = snapshot.clone();
            outcome = result;
        });
        (published, outcome)
    }

    fn failed(&self, operation: ListOperation, err: TransportError) -> TransportError {
        warn!(%operation, error = %err, "repository operation failed; collection unchanged");
        self.emit(ListEvent::OperationFailed {
            operation,
            message: err.to_string(),
        });
        err
    }

    fn emit(&self, event: ListEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
