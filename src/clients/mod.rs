use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{Product, ProductForm};
use crate::error::CatalogError;
use crate::messages::CatalogRequest;

/// Generate client methods with oneshot channel boilerplate and
/// automatic tracing. Send/receive failures surface as
/// [`CatalogError::ServiceUnavailable`].
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, CatalogError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| {
                    CatalogError::ServiceUnavailable("catalog service closed".to_string())
                })?;

                response.await.map_err(|_| {
                    CatalogError::ServiceUnavailable("catalog service dropped the request".to_string())
                })?
            }
        }
    };
}

/// Handle for the catalog service. Thin wrapper around the message
/// channel; cheap to clone.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    /// Manual method: shutdown carries no response channel.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|_| CatalogError::ServiceUnavailable("catalog service closed".to_string()))
    }
}

client_method!(CatalogClient => fn refresh() -> usize as CatalogRequest::Refresh);
client_method!(CatalogClient => fn add_product(form: ProductForm) -> Product as CatalogRequest::AddProduct);
client_method!(CatalogClient => fn buy_product(id: String, quantity: u32) -> Product as CatalogRequest::BuyProduct);
client_method!(CatalogClient => fn delete_product(id: String) -> () as CatalogRequest::DeleteProduct);
client_method!(CatalogClient => fn set_query(query: String) -> usize as CatalogRequest::SetQuery);
client_method!(CatalogClient => fn view() -> String as CatalogRequest::View);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(CatalogClient => fn get_product_count() -> usize as CatalogRequest::GetProductCount);
