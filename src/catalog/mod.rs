use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::CatalogClient;
use crate::domain::{Product, ProductForm};
use crate::error::{CatalogError, ValidationError};
use crate::messages::{CatalogRequest, ServiceResponse};
use crate::remote::ProductApi;
use crate::render;
use crate::search;
use crate::store::ProductStore;

/// Catalog actor: the single owner of the local product mirror and the
/// live search query.
///
/// Requests are processed one at a time, so no two remote calls are
/// ever in flight against the same product and every read sees a
/// consistent store. Mutating handlers follow the same shape:
/// validate, call the remote, and only mirror the change locally once
/// the server has confirmed it.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    api: Arc<dyn ProductApi>,
    store: ProductStore,
    query: String,
}

impl CatalogService {
    pub fn new(buffer_size: usize, api: Arc<dyn ProductApi>) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            api,
            store: ProductStore::new(),
            query: String::new(),
        };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::Refresh { respond_to } => {
                    self.handle_refresh(respond_to).await;
                }
                CatalogRequest::AddProduct { form, respond_to } => {
                    self.handle_add_product(form, respond_to).await;
                }
                CatalogRequest::BuyProduct {
                    id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_buy_product(id, quantity, respond_to).await;
                }
                CatalogRequest::DeleteProduct { id, respond_to } => {
                    self.handle_delete_product(id, respond_to).await;
                }
                CatalogRequest::SetQuery { query, respond_to } => {
                    self.handle_set_query(query, respond_to);
                }
                CatalogRequest::View { respond_to } => {
                    self.handle_view(respond_to);
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
                #[cfg(test)]
                CatalogRequest::GetProductCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!("CatalogService stopped");
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_refresh(&mut self, respond_to: ServiceResponse<usize>) {
        debug!("Processing refresh request");

        match self.api.list().await {
            Ok(products) => {
                info!(product_count = products.len(), "Catalog fetched");
                self.store.load(products);
                let _ = respond_to.send(Ok(self.store.len()));
            }
            Err(e) => {
                error!(error = %e, "Catalog fetch failed");
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    #[instrument(fields(product_name = %form.name), skip(self, form, respond_to))]
    async fn handle_add_product(&mut self, form: ProductForm, respond_to: ServiceResponse<Product>) {
        debug!("Processing add_product request");

        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(e) => {
                warn!(error = %e, "Validation failed, no remote call issued");
                let _ = respond_to.send(Err(e.into()));
                return;
            }
        };

        match self.api.create(&draft).await {
            Ok(created) => {
                info!(product_id = %created.id, "Product added");
                self.store.upsert(created.clone());
                let _ = respond_to.send(Ok(created));
            }
            Err(e) => {
                error!(error = %e, "Remote create failed");
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    /// Stock guard runs against the local mirror first; if it fails, the
    /// remote never sees the request. The server stays authoritative and
    /// re-checks on its side regardless.
    #[instrument(fields(product_id = %id, quantity = %quantity), skip(self, respond_to))]
    async fn handle_buy_product(
        &mut self,
        id: String,
        quantity: u32,
        respond_to: ServiceResponse<Product>,
    ) {
        debug!("Processing buy_product request");

        let product = match self.store.get(&id) {
            Some(product) => product.clone(),
            None => {
                warn!("Unknown product");
                let _ = respond_to.send(Err(CatalogError::UnknownProduct(id)));
                return;
            }
        };

        if product.qty < quantity {
            warn!(
                available = product.qty,
                requested = quantity,
                "Insufficient stock, no remote call issued"
            );
            let _ = respond_to.send(Err(ValidationError::InsufficientStock {
                requested: quantity,
                available: product.qty,
            }
            .into()));
            return;
        }

        let mut updated = product;
        updated.qty -= quantity;

        // Confirm-then-mutate: the mirror only changes after the server
        // accepts the new quantity.
        match self.api.update(&id, &updated).await {
            Ok(()) => {
                info!(remaining_stock = updated.qty, "Purchase confirmed");
                self.store.upsert(updated.clone());
                let _ = respond_to.send(Ok(updated));
            }
            Err(e) => {
                error!(error = %e, "Remote update failed");
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    async fn handle_delete_product(&mut self, id: String, respond_to: ServiceResponse<()>) {
        debug!("Processing delete_product request");

        match self.api.delete(&id).await {
            Ok(()) => {
                let removed = self.store.remove(&id);
                info!(removed, "Product deleted");
                let _ = respond_to.send(Ok(()));
            }
            Err(e) => {
                error!(error = %e, "Remote delete failed");
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    #[instrument(fields(query = %query), skip(self, respond_to))]
    fn handle_set_query(&mut self, query: String, respond_to: ServiceResponse<usize>) {
        debug!("Processing set_query request");

        self.query = query;
        let matches = search::apply(self.store.all(), &self.query).len();
        info!(matches, "Query updated");

        let _ = respond_to.send(Ok(matches));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_view(&self, respond_to: ServiceResponse<String>) {
        debug!("Processing view request");

        let view = search::apply(self.store.all(), &self.query);
        let markup = render::render(&view);

        let _ = respond_to.send(Ok(markup));
    }
}
