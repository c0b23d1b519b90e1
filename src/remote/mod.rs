//! Remote product service seam: the [`ProductApi`] port and its
//! reqwest-backed adapter.

pub mod http;

pub use http::HttpProductApi;

use async_trait::async_trait;

use crate::domain::{NewProduct, Product};
use crate::error::RemoteError;

/// Operations the remote product service exposes.
///
/// The catalog service only ever talks to the remote through this
/// trait, so tests can substitute an in-memory fake.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// `GET {base}` - the full catalog.
    async fn list(&self) -> Result<Vec<Product>, RemoteError>;

    /// `POST {base}/add-product` - returns the stored record, id included.
    async fn create(&self, draft: &NewProduct) -> Result<Product, RemoteError>;

    /// `PUT {base}/update-product/{id}` - full record replacement. The
    /// confirmation body is ignored; the record sent is the truth once
    /// the server accepts it.
    async fn update(&self, id: &str, product: &Product) -> Result<(), RemoteError>;

    /// `DELETE {base}/delete-product/{id}`.
    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}
