//! Batch resolution of product references
//!
//! Turns a list of product ids into resolved records, or fails the whole
//! batch when any id is unknown. Used both for read-only order validation
//! and as the first phase of a stock decrement.

use std::sync::Arc;

use futures::future;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;

/// Resolves batches of product ids against a repository handle.
///
/// Stateless orchestration; lookups for distinct ids run concurrently and
/// results come back in input order. Duplicate ids resolve independently.
pub struct BatchResolver<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> BatchResolver<R> {
    /// Create a resolver over the given repository handle
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolve every id or fail the whole batch
    ///
    /// Returns the records in input order. If any id is unknown the call
    /// fails with `InvalidReference` carrying all offending ids, and no
    /// partial result is returned.
    #[instrument(skip(self, ids), fields(batch_len = ids.len()))]
    pub async fn resolve(&self, ids: &[Uuid]) -> ProductResult<Vec<Product>> {
        let lookups = ids.iter().map(|id| self.repository.get_by_id(*id));
        let results = future::join_all(lookups).await;

        let mut products = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for (id, result) in ids.iter().zip(results) {
            match result? {
                Some(product) => products.push(product),
                None => missing.push(*id),
            }
        }

        if !missing.is_empty() {
            return Err(ProductError::InvalidReference(missing));
        }
        Ok(products)
    }
}

impl<R: ProductRepository> Clone for BatchResolver<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
