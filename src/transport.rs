//! HTTP boundary of the client.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method};
use serde_json::Value;
use url::Url;

use crate::Result;
use crate::error::Error;

/// Sends a request and returns the raw response body.
///
/// Implementations own retries, timeouts and authentication headers; the order client calls
/// `send` exactly once per operation.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Vec<u8>>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    host: Url,
    client: ReqwestClient,
}

impl HttpTransport {
    #[must_use]
    pub fn new(host: Url) -> Self {
        Self::with_client(host, ReqwestClient::new())
    }

    /// Uses a preconfigured client, e.g. one carrying default headers or timeouts.
    #[must_use]
    pub fn with_client(host: Url, client: ReqwestClient) -> Self {
        Self { host, client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, body, query), err(level = "warn"))
    )]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Vec<u8>> {
        let mut request = self.client.request(method.clone(), self.host.join(path)?);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status_code = response.status();
        if !status_code.is_success() {
            let message = error_body(response.text().await);

            #[cfg(feature = "tracing")]
            tracing::warn!(status = %status_code, %method, path, "request failed");

            return Err(Error::status(status_code, method, path.to_owned(), message));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Body of a failed response, or why it could not be read.
fn error_body(body: reqwest::Result<String>) -> String {
    match body {
        Ok(text) => text,
        Err(e) => format!("failed to read response body: {e}"),
    }
}
