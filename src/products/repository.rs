// Product storage: the repository capability plus its Postgres and in-memory engines

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::error::RepositoryError;
use crate::id::Id;
use crate::products::models::Product;
use crate::query::{ListQuery, SortDirection};
use crate::repository::{map_write_error, Repository};

/// Product persistence with ordered, paginated listing
#[async_trait]
pub trait ProductRepository: Repository<Product> {
    /// Products ordered by creation time, sliced by the query's page window
    async fn list_all(&self, query: ListQuery) -> Result<Vec<Product>, RepositoryError>;
}

/// Postgres-backed product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Product> for PgProductRepository {
    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        tracing::debug!("Inserting product {}", product.id);

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Id) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price, created_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE products SET name = $1, price = $2 WHERE id = $3")
            .bind(&product.name)
            .bind(product.price)
            .bind(product.id)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_all(&self, query: ListQuery) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT id, name, price, created_at FROM products{}",
            query.sql_tail("created_at", "id")
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Listed {} products", products.len());
        Ok(products)
    }
}

/// In-memory product repository
/// Records are kept in insertion order, which breaks ties between equal timestamps
#[derive(Default)]
pub struct MemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Product> for MemoryProductRepository {
    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id == product.id) {
            return Err(RepositoryError::Conflict(format!(
                "duplicate product id {}",
                product.id
            )));
        }
        products.push(product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Id) -> Result<Product, RepositoryError> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        let existing = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(RepositoryError::NotFound)?;

        existing.name = product.name.clone();
        existing.price = product.price;
        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        products.remove(index);
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list_all(&self, query: ListQuery) -> Result<Vec<Product>, RepositoryError> {
        let mut ordered = self.products.read().await.clone();
        // sort_by is stable, so equal timestamps keep insertion order
        match query.sort {
            SortDirection::Asc => ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortDirection::Desc => ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        Ok(query.paginate(ordered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn seed(repo: &dyn ProductRepository, count: usize) -> Vec<Product> {
        let mut created = Vec::with_capacity(count);
        for i in 1..=count {
            let product = Product::new(format!("Product {}", i), 10.0 * i as f64).unwrap();
            repo.create(&product).await.unwrap();
            created.push(product);
        }
        created
    }

    async fn check_crud(repo: Arc<dyn ProductRepository>) {
        let product = Product::new("Product 1", 10.5).unwrap();
        repo.create(&product).await.unwrap();

        let found = repo.find_by_id(product.id).await.unwrap();
        assert_eq!(found, product);

        let mut changed = product.clone();
        changed.name = "Product 2".to_string();
        changed.price = 20.5;
        repo.update(&changed).await.unwrap();

        let found = repo.find_by_id(product.id).await.unwrap();
        assert_eq!(found.name, "Product 2");
        assert_eq!(found.price, 20.5);
        assert_eq!(found.created_at, product.created_at);

        repo.delete(product.id).await.unwrap();
        assert!(matches!(
            repo.find_by_id(product.id).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(repo.delete(product.id).await, Err(RepositoryError::NotFound)));
        assert!(matches!(repo.update(&changed).await, Err(RepositoryError::NotFound)));
    }

    async fn check_pagination(repo: Arc<dyn ProductRepository>) {
        seed(&*repo, 23).await;

        let page1 = repo.list_all(ListQuery::new(1, 10, SortDirection::Asc)).await.unwrap();
        assert_eq!(page1.len(), 10);
        assert_eq!(page1[0].name, "Product 1");
        assert_eq!(page1[9].name, "Product 10");

        let page2 = repo.list_all(ListQuery::new(2, 10, SortDirection::Asc)).await.unwrap();
        assert_eq!(page2.len(), 10);
        assert_eq!(page2[0].name, "Product 11");
        assert_eq!(page2[9].name, "Product 20");

        let page3 = repo.list_all(ListQuery::new(3, 10, SortDirection::Asc)).await.unwrap();
        let names: Vec<_> = page3.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Product 21", "Product 22", "Product 23"]);

        let page4 = repo.list_all(ListQuery::new(4, 10, SortDirection::Asc)).await.unwrap();
        assert!(page4.is_empty());

        let everything = repo.list_all(ListQuery::new(0, 10, SortDirection::Asc)).await.unwrap();
        assert_eq!(everything.len(), 23);
    }

    async fn check_equal_timestamps_page_cleanly(repo: Arc<dyn ProductRepository>) {
        let stamp = Product::new("Anchor", 1.0).unwrap().created_at;
        let mut expected = Vec::new();
        for i in 1..=9 {
            let mut product = Product::new(format!("Tied {}", i), 1.0).unwrap();
            product.created_at = stamp;
            repo.create(&product).await.unwrap();
            expected.push(product.id);
        }
        expected.sort();

        for sort in [SortDirection::Asc, SortDirection::Desc] {
            let mut seen = Vec::new();
            for page in 1..=3 {
                let rows = repo.list_all(ListQuery::new(page, 4, sort)).await.unwrap();
                seen.extend(rows.into_iter().map(|p| p.id));
            }
            seen.sort();
            assert_eq!(seen, expected);
        }
    }

    #[tokio::test]
    async fn test_memory_crud() {
        check_crud(Arc::new(MemoryProductRepository::new())).await;
    }

    #[tokio::test]
    async fn test_memory_pagination() {
        check_pagination(Arc::new(MemoryProductRepository::new())).await;
    }

    #[tokio::test]
    async fn test_memory_equal_timestamps() {
        check_equal_timestamps_page_cleanly(Arc::new(MemoryProductRepository::new())).await;
    }

    #[tokio::test]
    async fn test_memory_desc_order() {
        let repo = MemoryProductRepository::new();
        let mut first = Product::new("Old", 1.0).unwrap();
        first.created_at = first.created_at - chrono::Duration::seconds(60);
        let second = Product::new("New", 2.0).unwrap();
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        let desc = repo.list_all(ListQuery::new(0, 0, SortDirection::Desc)).await.unwrap();
        assert_eq!(desc[0].name, "New");
        assert_eq!(desc[1].name, "Old");

        let asc = repo.list_all(ListQuery::all()).await.unwrap();
        assert_eq!(asc[0].name, "Old");
    }

    #[tokio::test]
    async fn test_memory_duplicate_id_is_conflict() {
        let repo = MemoryProductRepository::new();
        let product = Product::new("Widget", 9.99).unwrap();
        repo.create(&product).await.unwrap();
        assert!(matches!(
            repo.create(&product).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    /// Postgres tests run only when TEST_DATABASE_URL points at a scratch database
    async fn test_pool() -> Option<PgPool> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = crate::db::create_pool(&url, 5)
            .await
            .expect("Failed to connect to test database");
        crate::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        sqlx::query("DELETE FROM products")
            .execute(&pool)
            .await
            .expect("Failed to clean products");
        Some(pool)
    }

    // All Postgres scenarios share one test so they never race on the products table
    #[tokio::test]
    async fn test_postgres_repository() {
        let Some(pool) = test_pool().await else {
            return;
        };
        check_crud(Arc::new(PgProductRepository::new(pool.clone()))).await;
        check_pagination(Arc::new(PgProductRepository::new(pool.clone()))).await;

        sqlx::query("DELETE FROM products")
            .execute(&pool)
            .await
            .expect("Failed to clean products");
        check_equal_timestamps_page_cleanly(Arc::new(PgProductRepository::new(pool))).await;
    }
}
