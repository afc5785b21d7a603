//! In-memory implementation of ProductRepository
//!
//! Backs tests and local development. The concurrency contract is the same
//! as the durable backends: decrements on one product serialize on that
//! product's lock, while unrelated products proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};
use crate::repository::ProductRepository;

#[derive(Default)]
struct Catalog {
    products: HashMap<Uuid, Arc<RwLock<Product>>>,
    // name -> id, enforces name uniqueness and backs get_by_name
    names: HashMap<String, Uuid>,
}

/// In-memory implementation of the ProductRepository
#[derive(Default)]
pub struct InMemoryProductRepository {
    catalog: RwLock<Catalog>,
}

impl InMemoryProductRepository {
    /// Create an empty in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the per-product handle without holding the catalog lock
    /// across the product access.
    async fn handle(&self, id: Uuid) -> Option<Arc<RwLock<Product>>> {
        let catalog = self.catalog.read().await;
        catalog.products.get(&id).cloned()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut catalog = self.catalog.write().await;

        if catalog.names.contains_key(&input.name) {
            return Err(ProductError::DuplicateName(input.name));
        }

        let product = Product::new(input);
        catalog.names.insert(product.name.clone(), product.id);
        catalog
            .products
            .insert(product.id, Arc::new(RwLock::new(product.clone())));

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        match self.handle(id).await {
            Some(handle) => Ok(Some(handle.read().await.clone())),
            None => Ok(None),
        }
    }

    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let id = {
            let catalog = self.catalog.read().await;
            catalog.names.get(name).copied()
        };
        match id {
            Some(id) => self.get_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let catalog = self.catalog.read().await;
        Ok(catalog.names.contains_key(name))
    }

    #[instrument(skip(self))]
    async fn commit_decrement(&self, id: Uuid, amount: i32) -> ProductResult<Product> {
        let handle = self.handle(id).await.ok_or(ProductError::NotFound(id))?;

        // The write lock is the linearization point for this product;
        // the availability check and the write happen under it.
        let mut product = handle.write().await;
        if product.quantity < amount {
            return Err(ProductError::Conflict {
                available: product.quantity,
                requested: amount,
            });
        }

        product.quantity -= amount;
        product.updated_at = Utc::now();

        tracing::info!(product_id = %id, amount, "Stock decremented");
        Ok(product.clone())
    }
}
