//! Products Domain
//!
//! Data-access layer for a product catalog: create products, look them up
//! by name or by a batch of ids, and decrement stock quantities when an
//! order is placed. Concurrent orders never drive a quantity below zero.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Stock ledger: validation, batch decrement protocol
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Resolver   │  ← Batch id resolution (concurrent fan-out, fail-fast)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB / in-memory backends)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     models::{CreateProduct, StockDemand},
//!     mongodb::MongoProductRepository,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = ProductService::new(repository);
//!
//! let product = service
//!     .create_product(CreateProduct {
//!         name: "Widget".to_string(),
//!         price: 999,
//!         quantity: 10,
//!     })
//!     .await?;
//!
//! service
//!     .decrement_stock(&[StockDemand {
//!         id: product.id,
//!         quantity: 2,
//!     }])
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod resolver;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use memory::InMemoryProductRepository;
pub use models::{CreateProduct, Product, StockDemand};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use resolver::BatchResolver;
pub use service::ProductService;
