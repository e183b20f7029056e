//! HTTP adapter for the repositories service.

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    domain::{Repository, RepositoryId},
    protocol::{CreateRepositoryRequest, LIKE_SEGMENT, REPOSITORIES_SEGMENT},
};
use tracing::debug;
use url::Url;

use crate::{config::ClientSettings, error::TransportError};

/// The four calls the list controller issues. Implemented by [`ApiClient`] for
/// real traffic and by in-process fakes in tests.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Repository>, TransportError>;
    async fn create(&self, request: &CreateRepositoryRequest)
        -> Result<Repository, TransportError>;
    async fn like(&self, id: &RepositoryId) -> Result<Repository, TransportError>;
    /// The response body is implementation-defined and handed back as-is.
    async fn delete(&self, id: &RepositoryId) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, &settings.api_base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded `segments` to the base path, keeping any prefix
    /// such as `/api`.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TransportError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, TransportError> {
        let response = self.send(Method::GET, segments, None::<&()>).await?;
        decode_json(response).await
    }

    pub async fn post<B, T>(
        &self,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, segments, body).await?;
        decode_json(response).await
    }

    /// Empty bodies come back as `Value::Null`, non-JSON text as `Value::String`.
    pub async fn delete(&self, segments: &[&str]) -> Result<Value, TransportError> {
        let response = self.send(Method::DELETE, segments, None::<&()>).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
    }

    async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Response, TransportError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "sending api request");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }
        Ok(response)
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl RepositoryApi for ApiClient {
    async fn list(&self) -> Result<Vec<Repository>, TransportError> {
        self.get(&[REPOSITORIES_SEGMENT]).await
    }

    async fn create(
        &self,
        request: &CreateRepositoryRequest,
    ) -> Result<Repository, TransportError> {
        self.post(&[REPOSITORIES_SEGMENT], Some(request)).await
    }

    async fn like(&self, id: &RepositoryId) -> Result<Repository, TransportError> {
        let id = id.to_string();
        self.post(&[REPOSITORIES_SEGMENT, id.as_str(), LIKE_SEGMENT], None::<&()>)
            .await
    }

    async fn delete(&self, id: &RepositoryId) -> Result<Value, TransportError> {
        let id = id.to_string();
        ApiClient::delete(self, &[REPOSITORIES_SEGMENT, id.as_str()]).await
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
