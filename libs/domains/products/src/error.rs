use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Product with name '{0}' not found")]
    NameNotFound(String),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// One or more ids in a batch did not resolve. Carries every offending
    /// id; raised before any store mutation.
    #[error("Invalid product reference(s): {0:?}")]
    InvalidReference(Vec<Uuid>),

    /// Store-internal: a conditional decrement found too little stock at
    /// commit time. Translated to InsufficientStock by the service layer.
    #[error("Decrement conflict: available {available}, requested {requested}")]
    Conflict { available: i32, requested: i32 },

    #[error("Insufficient stock for product {id}: available {available}, requested {requested}")]
    InsufficientStock {
        id: Uuid,
        available: i32,
        requested: i32,
    },

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
