use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote service. The wire shape is either a JSON
/// number or a JSON string, so both are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RepositoryId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for RepositoryId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for RepositoryId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl RepositoryId {
    /// Numeric-looking input becomes `Number`, anything else `Text`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(value) => Self::Number(value),
            Err(_) => Self::Text(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: RepositoryId,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub techs: Vec<String>,
    #[serde(default)]
    pub likes: u64,
}
