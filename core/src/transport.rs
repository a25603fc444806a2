//! The single JSON-over-HTTP request helper shared by every binding.
//!
//! `Transport` pairs the stateless `ApiClient` with an `HttpHost`. It never
//! retries and sets no timeout of its own: a host that never answers leaves
//! the caller waiting.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiClient, RequestOptions};
use crate::command::{ResourceKind, Toggleable};
use crate::error::ApiError;
use crate::http::{HttpHost, HttpRequest, HttpResponse};
use crate::types::ItemId;

pub struct Transport<H> {
    client: ApiClient,
    host: H,
}

impl<H: HttpHost> Transport<H> {
    pub fn new(client: ApiClient, host: H) -> Self {
        Self { client, host }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run one round-trip through the host.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.path.clone();
        match self.host.execute(request).await {
            Ok(response) => {
                tracing::debug!(method = method.as_str(), %url, status = response.status, "request completed");
                Ok(response)
            }
            Err(err) => {
                tracing::debug!(method = method.as_str(), %url, error = %err, "request did not complete");
                Err(err)
            }
        }
    }

    /// Send a JSON request to `path` and return the parsed body, or `None`
    /// for 204.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Option<Value>, ApiError> {
        let response = self.execute(self.client.build_request(path, options)).await?;
        self.client.parse_response(response)
    }

    pub async fn fetch_all<T: DeserializeOwned>(&self, kind: ResourceKind) -> Result<Vec<T>, ApiError> {
        let response = self.execute(self.client.build_list(kind)).await?;
        self.client.parse_list(response)
    }

    pub async fn create<P, T>(&self, kind: ResourceKind, payload: &P) -> Result<T, ApiError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let response = self.execute(self.client.build_create(kind, payload)?).await?;
        self.client.parse_create(response)
    }

    pub async fn toggle(&self, kind: Toggleable, id: ItemId) -> Result<(), ApiError> {
        let response = self.execute(self.client.build_toggle(kind, id)).await?;
        self.client.parse_empty(response)
    }

    pub async fn remove(&self, kind: ResourceKind, id: ItemId) -> Result<(), ApiError> {
        let response = self.execute(self.client.build_delete(kind, id)).await?;
        self.client.parse_empty(response)
    }
}
