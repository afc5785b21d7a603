use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends (MongoDB, in-memory, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product with a freshly assigned id
    ///
    /// Fails with `DuplicateName` if a product with the same name exists.
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Get a product by name
    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// Check if a product name exists
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool>;

    /// Atomically decrement a product's quantity
    ///
    /// If the current quantity covers `amount`, writes `current - amount`
    /// and returns the updated record. Fails with `Conflict` (no mutation)
    /// when the stock is short, or `NotFound` when the record is missing.
    ///
    /// Implementations must be linearizable per product id: concurrent
    /// callers on the same id serialize at a single commit point and no
    /// reader ever observes a negative quantity. Operations on unrelated
    /// ids must not block each other.
    async fn commit_decrement(&self, id: Uuid, amount: i32) -> ProductResult<Product>;
}
