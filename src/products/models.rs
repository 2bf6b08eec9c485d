use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::EntityError;
use crate::id::Id;

/// A product in the catalog
///
/// Constructed only through `Product::new`, so a stored product always has a
/// non-empty name and a strictly positive price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub price: f64,
    /// Set once at construction, never updated
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Build and validate a new product with a fresh id and the current time
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, EntityError> {
        let product = Self {
            id: Id::generate(),
            name: name.into(),
            price,
            // Postgres keeps microseconds; truncating here keeps round-trips exact
            created_at: Utc::now().trunc_subsecs(6),
        };
        product.validate()?;
        Ok(product)
    }

    pub fn validate(&self) -> Result<(), EntityError> {
        if self.name.is_empty() {
            return Err(EntityError::NameRequired);
        }
        if self.price == 0.0 {
            return Err(EntityError::PriceRequired);
        }
        if self.price < 0.0 || !self.price.is_finite() {
            return Err(EntityError::InvalidPrice);
        }
        Ok(())
    }
}

/// Body of POST /products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub price: f64,
}

/// Body of PUT /products/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductInput {
    pub name: String,
    pub price: f64,
}
