use serde::{Deserialize, Serialize};

pub const REPOSITORIES_SEGMENT: &str = "repositories";
pub const LIKE_SEGMENT: &str = "like";

/// Body of `POST repositories`. The service owns `id` and `likes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepositoryRequest {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub techs: Vec<String>,
}
