//! # Mock Remote
//!
//! In-memory stand-in for the remote product service.
//!
//! It mirrors the server-side rules the client relies on: id assignment
//! on create, full-record replacement on update, a not-found status for
//! unknown update targets, and idempotent delete. `fail_next` scripts a
//! one-shot failure so tests can observe that nothing is committed
//! locally when the remote rejects an operation.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{NewProduct, Product};
use crate::error::RemoteError;
use crate::remote::ProductApi;

#[derive(Default)]
pub struct MockRemote {
    products: Mutex<Vec<Product>>,
    next_id: AtomicU64,
    fail_next: Mutex<Option<RemoteError>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            ..Self::default()
        }
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let remote = Self::new();
        *remote.products.lock().unwrap() = products;
        remote
    }

    /// Scripts the next call, whichever it is, to fail with `error`.
    pub fn fail_next(&self, error: RemoteError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.products.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn product_count(&self) -> usize {
        self.products.lock().unwrap().len()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> Option<RemoteError> {
        self.fail_next.lock().unwrap().take()
    }
}

#[async_trait]
impl ProductApi for MockRemote {
    async fn list(&self) -> Result<Vec<Product>, RemoteError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        Ok(self.products.lock().unwrap().clone())
    }

    async fn create(&self, draft: &NewProduct) -> Result<Product, RemoteError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product::new(
            format!("product_{id}"),
            draft.name.clone(),
            draft.description.clone(),
            draft.price,
            draft.qty,
        );
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, product: &Product) -> Result<(), RemoteError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(RemoteError::Status {
                status: 404,
                preview: "product not found".to_string(),
            }),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        self.products.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let remote = MockRemote::new();
        let draft = NewProduct {
            name: "Milk".to_string(),
            description: "1L".to_string(),
            price: 60.0,
            qty: 10,
        };

        let first = remote.create(&draft).await.unwrap();
        let second = remote.create(&draft).await.unwrap();
        assert_eq!(first.id, "product_1");
        assert_eq!(second.id, "product_2");
        assert_eq!(remote.product_count(), 2);
    }

    #[tokio::test]
    async fn scripted_failure_fires_once() {
        let remote = MockRemote::new();
        remote.fail_next(RemoteError::Transport("connection reset".to_string()));

        assert!(remote.list().await.is_err());
        assert!(remote.list().await.is_ok());
    }

    #[tokio::test]
    async fn updating_an_unknown_id_is_a_not_found_status() {
        let remote = MockRemote::new();
        let ghost = Product::new("ghost", "x", "y", 1.0, 1);

        let error = remote.update("ghost", &ghost).await.unwrap_err();
        assert!(matches!(error, RemoteError::Status { status: 404, .. }));
    }
}
