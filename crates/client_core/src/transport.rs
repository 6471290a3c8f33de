//! Remote call boundary. The controller only sees [`RemoteCall`] and [`HttpReply`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::protocol::{NewProduct, RepositorySearchResponse, SearchQuery};
use tracing::debug;
use url::Url;

use crate::error::{DecodeError, TransportError};

/// A response whose body has been read to the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[async_trait]
pub trait RemoteCall: Send + Sync {
    type Payload: Send + Sync;
    type Output: Send;

    /// Resolves once with either a full reply or a transport failure.
    async fn submit(&self, payload: &Self::Payload) -> Result<HttpReply, TransportError>;

    fn decode(&self, reply: &HttpReply) -> Result<Self::Output, DecodeError>;
}

fn endpoint(base_url: &Url, path: &str) -> Result<Url, TransportError> {
    let mut base_url = base_url.clone();
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    Ok(base_url.join(path)?)
}

async fn read_reply(response: Response) -> Result<HttpReply, TransportError> {
    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|error| TransportError::Body(error.to_string()))?;
    Ok(HttpReply::new(status, body.to_vec()))
}

/// `POST {base}/products`.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    endpoint: Url,
}

impl HttpProductApi {
    pub fn new(base_url: &Url) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &Url) -> Result<Self, TransportError> {
        Ok(Self {
            client,
            endpoint: endpoint(base_url, "products")?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteCall for HttpProductApi {
    type Payload = NewProduct;
    type Output = ();

    async fn submit(&self, payload: &NewProduct) -> Result<HttpReply, TransportError> {
        debug!(endpoint = %self.endpoint, "posting product");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        read_reply(response).await
    }

    fn decode(&self, _reply: &HttpReply) -> Result<(), DecodeError> {
        Ok(())
    }
}

/// `GET {base}/search/repositories?q=...`.
#[derive(Debug, Clone)]
pub struct HttpRepositoryApi {
    client: Client,
    endpoint: Url,
}

impl HttpRepositoryApi {
    pub fn new(base_url: &Url) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &Url) -> Result<Self, TransportError> {
        Ok(Self {
            client,
            endpoint: endpoint(base_url, "search/repositories")?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteCall for HttpRepositoryApi {
    type Payload = SearchQuery;
    type Output = RepositorySearchResponse;

    async fn submit(&self, payload: &SearchQuery) -> Result<HttpReply, TransportError> {
        debug!(endpoint = %self.endpoint, query = ?payload.q, "searching repositories");
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(payload)
            .send()
            .await?;
        read_reply(response).await
    }

    fn decode(&self, reply: &HttpReply) -> Result<RepositorySearchResponse, DecodeError> {
        reply.json()
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
