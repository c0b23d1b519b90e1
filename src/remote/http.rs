//! Reqwest-backed adapter for the remote product service.
//!
//! This adapter owns transport details only: request serialisation,
//! timeout, HTTP status mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::ProductApi;
use crate::domain::{NewProduct, Product};
use crate::error::RemoteError;

pub struct HttpProductApi {
    client: Client,
    base_url: Url,
}

impl HttpProductApi {
    /// Builds an adapter with an explicit request timeout. The client
    /// performs no retries and supports no cancellation: once a request
    /// is issued it runs to success, failure, or timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, suffix: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if suffix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{suffix}")
        }
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<Product>, RemoteError> {
        let response = self
            .client
            .get(self.endpoint(""))
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = require_success(response).await?;
        decode(&body)
    }

    async fn create(&self, draft: &NewProduct) -> Result<Product, RemoteError> {
        let response = self
            .client
            .post(self.endpoint("add-product"))
            .json(draft)
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = require_success(response).await?;
        decode(&body)
    }

    async fn update(&self, id: &str, product: &Product) -> Result<(), RemoteError> {
        let response = self
            .client
            .put(self.endpoint(&format!("update-product/{id}")))
            .json(product)
            .send()
            .await
            .map_err(map_transport_error)?;
        require_success(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("delete-product/{id}")))
            .send()
            .await
            .map_err(map_transport_error)?;
        require_success(response).await?;
        Ok(())
    }
}

/// Any non-2xx status is an operation failure; the body is kept only as
/// a bounded preview for the notice text.
async fn require_success(response: Response) -> Result<Vec<u8>, RemoteError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(RemoteError::Status {
            status: status.as_u16(),
            preview: body_preview(&body),
        });
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, RemoteError> {
    serde_json::from_slice(body).map_err(|e| RemoteError::Decode(e.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Transport(format!("request timed out: {error}"))
    } else {
        RemoteError::Transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
