//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes
    ///
    /// The unique name index backs get_by_name and rejects duplicate names
    /// at the storage layer.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_name_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    fn id_filter(id: &Uuid) -> Document {
        doc! { "_id": to_bson(id).unwrap_or(Bson::Null) }
    }

    /// Filter that matches the record only while it still covers `amount`.
    /// Pairing it with a $inc update makes the decrement conditional and
    /// atomic at the document level.
    fn decrement_filter(id: &Uuid, amount: i32) -> Document {
        doc! {
            "_id": to_bson(id).unwrap_or(Bson::Null),
            "quantity": { "$gte": amount },
        }
    }

    fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        matches!(
            *err.kind,
            ErrorKind::Write(WriteFailure::WriteError(ref write_err)) if write_err.code == 11000
        )
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        if let Err(err) = self.collection.insert_one(&product).await {
            if Self::is_duplicate_key(&err) {
                return Err(ProductError::DuplicateName(product.name));
            }
            return Err(err.into());
        }

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(&id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let filter = doc! { "name": name };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let filter = doc! { "name": name };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn commit_decrement(&self, id: Uuid, amount: i32) -> ProductResult<Product> {
        let update = doc! {
            "$inc": { "quantity": -amount },
            "$set": { "updated_at": chrono::Utc::now().to_rfc3339() }
        };

        let updated = self
            .collection
            .find_one_and_update(Self::decrement_filter(&id, amount), update)
            .return_document(ReturnDocument::After)
            .await?;

        match updated {
            Some(product) => {
                tracing::info!(product_id = %id, amount, "Stock decremented");
                Ok(product)
            }
            // The conditional filter matched nothing: the record is either
            // missing or short on stock. A follow-up read disambiguates.
            None => match self.get_by_id(id).await? {
                Some(product) => Err(ProductError::Conflict {
                    available: product.quantity,
                    requested: amount,
                }),
                None => Err(ProductError::NotFound(id)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_filter_targets_primary_key() {
        let id = Uuid::now_v7();
        let filter = MongoProductRepository::id_filter(&id);
        assert!(filter.contains_key("_id"));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_decrement_filter_guards_available_quantity() {
        let id = Uuid::now_v7();
        let filter = MongoProductRepository::decrement_filter(&id, 7);

        assert!(filter.contains_key("_id"));
        let guard = filter.get_document("quantity").unwrap();
        assert_eq!(guard.get_i32("$gte").unwrap(), 7);
    }
}
