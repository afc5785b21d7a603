use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Product entity - a catalog record with a mutable stock counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name, unique across the store
    pub name: String,
    /// Price in cents (for precision)
    pub price: i64,
    /// Display price (computed from price)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_price: Option<f64>,
    /// Stock on hand; never negative, mutated only through commit_decrement
    pub quantity: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    /// Initial stock quantity
    #[validate(range(min = 0))]
    #[serde(default)]
    pub quantity: i32,
}

/// One demand line of a decrement batch: product id plus the quantity to
/// take off the shelf. A batch may name the same product more than once;
/// each occurrence is an independent demand against the same counter.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StockDemand {
    /// Product ID
    pub id: Uuid,
    /// Quantity to decrement
    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            price: input.price,
            display_price: Some(input.price as f64 / 100.0),
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }
}
