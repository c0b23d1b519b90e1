use tokio::sync::oneshot;

use crate::domain::{Product, ProductForm};
use crate::error::CatalogError;

/// Generic type aliases for service communication
pub type ServiceResult<T> = std::result::Result<T, CatalogError>;
pub type ServiceResponse<T> = oneshot::Sender<ServiceResult<T>>;

/// Typed messages for the catalog service. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum CatalogRequest {
    /// Re-fetch the whole catalog from the remote and replace the
    /// store. Responds with the number of products loaded.
    Refresh {
        respond_to: ServiceResponse<usize>,
    },
    /// Validate the form, create the product remotely, mirror the
    /// server record locally. Responds with the stored record.
    AddProduct {
        form: ProductForm,
        respond_to: ServiceResponse<Product>,
    },
    /// Decrement stock by `quantity`, server-confirmed. Responds with
    /// the updated record.
    BuyProduct {
        id: String,
        quantity: u32,
        respond_to: ServiceResponse<Product>,
    },
    /// Delete remotely, then drop the local mirror entry.
    DeleteProduct {
        id: String,
        respond_to: ServiceResponse<()>,
    },
    /// Replace the live search query. Responds with the number of
    /// products the new filtered view contains.
    SetQuery {
        query: String,
        respond_to: ServiceResponse<usize>,
    },
    /// Render the current filtered view as list markup.
    View {
        respond_to: ServiceResponse<String>,
    },
    Shutdown,
    #[cfg(test)]
    GetProductCount {
        respond_to: ServiceResponse<usize>,
    },
}
