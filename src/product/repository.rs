use super::model::{NewProduct, Product, ProductId};
use crate::lifecycle::{LifecycleError, OnModuleDestroy, OnModuleInit};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write; carries the constraint text.
    #[error("{0}")]
    UniqueViolation(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence port for products
///
/// `insert` and `save` both report a duplicate product name as
/// [`RepositoryError::UniqueViolation`].
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; the repository assigns its id.
    async fn insert(&self, product: NewProduct) -> RepositoryResult<Product>;

    /// Persist the current state of an existing product.
    async fn save(&self, product: Product) -> RepositoryResult<Product>;

    async fn read(&self, id: ProductId) -> RepositoryResult<Option<Product>>;

    async fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    async fn delete(&self, product: Product) -> RepositoryResult<()>;
}

const NAME_CONSTRAINT: &str = "UNIQUE constraint failed: products.name";

/// Process-local product table
///
/// Ids come from a sequence starting at 1 and are never reused. `find_all`
/// returns products in ascending id order.
pub struct InMemoryProductRepository {
    table: RwLock<BTreeMap<ProductId, Product>>,
    next_id: AtomicI32,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    fn name_taken(
        table: &BTreeMap<ProductId, Product>,
        name: &str,
        except: Option<ProductId>,
    ) -> bool {
        table
            .values()
            .any(|existing| existing.name == name && Some(existing.id) != except)
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: NewProduct) -> RepositoryResult<Product> {
        let mut table = self.table.write().await;
        if Self::name_taken(&table, &product.name, None) {
            return Err(RepositoryError::UniqueViolation(NAME_CONSTRAINT.to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Product {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
        };
        table.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        let mut table = self.table.write().await;
        if !table.contains_key(&product.id) {
            return Err(RepositoryError::Storage(format!(
                "no row with id {} to update",
                product.id
            )));
        }
        if Self::name_taken(&table, &product.name, Some(product.id)) {
            return Err(RepositoryError::UniqueViolation(NAME_CONSTRAINT.to_string()));
        }

        table.insert(product.id, product.clone());
        Ok(product)
    }

    async fn read(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self.table.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.table.read().await.values().cloned().collect())
    }

    async fn delete(&self, product: Product) -> RepositoryResult<()> {
        self.table.write().await.remove(&product.id);
        Ok(())
    }
}

#[async_trait]
impl OnModuleInit for InMemoryProductRepository {
    async fn on_module_init(&self) -> Result<(), LifecycleError> {
        tracing::info!("In-memory product store ready");
        Ok(())
    }
}

#[async_trait]
impl OnModuleDestroy for InMemoryProductRepository {
    async fn on_module_destroy(&self) -> Result<(), LifecycleError> {
        let mut table = self.table.write().await;
        tracing::info!("Discarding in-memory product store ({} products)", table.len());
        table.clear();
        Ok(())
    }
}
