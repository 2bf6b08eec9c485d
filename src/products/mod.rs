// Product catalog: entity, storage and HTTP handlers

pub mod handlers;
pub mod models;
pub mod repository;

pub use handlers::{create_product, delete_product, get_product, list_products, update_product};
pub use models::{CreateProductInput, Product, UpdateProductInput};
pub use repository::{MemoryProductRepository, PgProductRepository, ProductRepository};
