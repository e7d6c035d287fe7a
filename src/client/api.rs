//! HTTP side of the page: one call per endpoint.

use crate::transport::http::types::{MessageResponse, RecordDocument};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value as JsonValue;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected reply: {0}")]
    Decode(String),
}

/// Reply to a mutating request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// 2xx status.
    pub ok: bool,
    pub message: String,
}

/// Reply to a single-record lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(RecordDocument),
    Missing(String),
}

#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn get_all(&self) -> Result<Vec<RecordDocument>, ClientError>;
    async fn get(&self, id: &str) -> Result<Lookup, ClientError>;
    async fn create(&self, payload: &JsonValue) -> Result<Reply, ClientError>;
    async fn update(&self, id: &str, payload: &JsonValue) -> Result<Reply, ClientError>;
    async fn delete(&self, id: &str) -> Result<Reply, ClientError>;
}

/// [`ResourceApi`] over HTTP, rooted at e.g. `http://localhost:8000/books`.
#[derive(Clone)]
pub struct HttpResourceApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResourceApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<(StatusCode, JsonValue), ClientError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str(&text)
            .map_err(|e| ClientError::Decode(format!("{} (body: {:?})", e, text)))?;
        Ok((status, body))
    }

    async fn mutate(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<Reply, ClientError> {
        let (status, body) = self.send(method, path, body).await?;
        let reply: MessageResponse =
            serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Reply {
            ok: status.is_success(),
            message: reply.message,
        })
    }
}

fn server_error(status: StatusCode, body: &JsonValue) -> ClientError {
    ClientError::Server {
        status: status.as_u16(),
        message: body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string(),
    }
}

#[async_trait]
impl ResourceApi for HttpResourceApi {
    async fn get_all(&self) -> Result<Vec<RecordDocument>, ClientError> {
        let (status, body) = self.send(Method::GET, "getAll", None).await?;
        if !status.is_success() {
            return Err(server_error(status, &body));
        }
        serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get(&self, id: &str) -> Result<Lookup, ClientError> {
        let (status, body) = self.send(Method::GET, &format!("get/{}", id), None).await?;
        if !status.is_success() {
            return Err(server_error(status, &body));
        }
        if body.get("_id").is_some() {
            let record =
                serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))?;
            return Ok(Lookup::Found(record));
        }
        match body.get("message").and_then(|m| m.as_str()) {
            Some(message) => Ok(Lookup::Missing(message.to_string())),
            None => Err(ClientError::Decode(format!("neither record nor message: {}", body))),
        }
    }

    async fn create(&self, payload: &JsonValue) -> Result<Reply, ClientError> {
        self.mutate(Method::POST, "create", Some(payload)).await
    }

    async fn update(&self, id: &str, payload: &JsonValue) -> Result<Reply, ClientError> {
        self.mutate(Method::PUT, &format!("update/{}", id), Some(payload))
            .await
    }

    async fn delete(&self, id: &str) -> Result<Reply, ClientError> {
        self.mutate(Method::DELETE, &format!("delete/{}", id), None)
            .await
    }
}
