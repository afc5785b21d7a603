//! Product Service - Business logic layer
//!
//! Owns the stock decrement protocol: resolve the batch, validate each
//! demand against the store's conditional commit, and surface the failing
//! product when stock runs short.

use std::sync::Arc;

use futures::future;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, StockDemand};
use crate::repository::ProductRepository;
use crate::resolver::BatchResolver;

/// Product service providing business logic operations
///
/// The service layer handles validation, name uniqueness, and orchestrates
/// batch resolution and stock decrements over the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    resolver: BatchResolver<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        let repository = Arc::new(repository);
        let resolver = BatchResolver::new(Arc::clone(&repository));
        Self {
            repository,
            resolver,
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if self.repository.exists_by_name(&input.name).await? {
            return Err(ProductError::DuplicateName(input.name));
        }

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Get a product by name
    #[instrument(skip(self))]
    pub async fn get_product_by_name(&self, name: &str) -> ProductResult<Product> {
        self.repository
            .get_by_name(name)
            .await?
            .ok_or_else(|| ProductError::NameNotFound(name.to_string()))
    }

    /// Resolve a batch of product ids to their current records
    ///
    /// Fails with `InvalidReference` if any id is unknown; read-only.
    #[instrument(skip(self, ids), fields(batch_len = ids.len()))]
    pub async fn resolve_products(&self, ids: &[Uuid]) -> ProductResult<Vec<Product>> {
        self.resolver.resolve(ids).await
    }

    /// Decrement stock for a batch of demands
    ///
    /// Resolution happens first: an unknown id fails the whole batch with
    /// `InvalidReference` and nothing is mutated. Each demand then commits
    /// independently against the store's conditional decrement; demands
    /// that committed before a failing one stay committed, and the error
    /// names the product whose stock ran short.
    #[instrument(skip(self, demands), fields(batch_len = demands.len()))]
    pub async fn decrement_stock(&self, demands: &[StockDemand]) -> ProductResult<Vec<Product>> {
        for demand in demands {
            demand
                .validate()
                .map_err(|e| ProductError::Validation(e.to_string()))?;
        }

        let ids: Vec<Uuid> = demands.iter().map(|demand| demand.id).collect();
        self.resolver.resolve(&ids).await?;

        let commits = demands
            .iter()
            .map(|demand| self.repository.commit_decrement(demand.id, demand.quantity));
        let results = future::join_all(commits).await;

        let mut updated = Vec::with_capacity(demands.len());
        for (demand, result) in demands.iter().zip(results) {
            match result {
                Ok(product) => updated.push(product),
                Err(ProductError::Conflict {
                    available,
                    requested,
                }) => {
                    return Err(ProductError::InsufficientStock {
                        id: demand.id,
                        available,
                        requested,
                    });
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!(batch_len = updated.len(), "Stock decrement batch committed");
        Ok(updated)
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            resolver: self.resolver.clone(),
        }
    }
}
