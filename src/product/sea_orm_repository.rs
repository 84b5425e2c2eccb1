use super::entity::{self, ActiveModel, Entity};
use super::model::{NewProduct, Product, ProductId};
use super::repository::{ProductRepository, RepositoryError, RepositoryResult};
use crate::lifecycle::{LifecycleError, OnModuleDestroy, OnModuleInit};
use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, SqlErr};

/// Product repository backed by a SeaORM connection pool
#[derive(Clone)]
pub struct SeaOrmProductRepository {
    conn: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn connect(url: &str) -> Result<Self, DbErr> {
        let conn = sea_orm::Database::connect(url).await?;
        Ok(Self::new(conn))
    }
}

fn map_db_err(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(constraint)) => {
            RepositoryError::UniqueViolation(constraint)
        }
        _ => RepositoryError::Storage(err.to_string()),
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn insert(&self, product: NewProduct) -> RepositoryResult<Product> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
        };
        model
            .insert(&self.conn)
            .await
            .map(Product::from)
            .map_err(map_db_err)
    }

    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        let model = ActiveModel {
            id: Unchanged(product.id),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
        };
        model
            .update(&self.conn)
            .await
            .map(Product::from)
            .map_err(map_db_err)
    }

    async fn read(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .map(|found| found.map(Product::from))
            .map_err(map_db_err)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.conn)
            .await
            .map(|models| models.into_iter().map(Product::from).collect())
            .map_err(map_db_err)
    }

    async fn delete(&self, product: Product) -> RepositoryResult<()> {
        Entity::delete_by_id(product.id)
            .exec(&self.conn)
            .await
            .map(|_| ())
            .map_err(map_db_err)
    }
}

#[async_trait]
impl OnModuleInit for SeaOrmProductRepository {
    /// Creates or migrates the `products` table to match the entity.
    async fn on_module_init(&self) -> Result<(), LifecycleError> {
        tracing::info!("Syncing products schema...");
        self.conn
            .get_schema_builder()
            .register(Entity)
            .sync(&self.conn)
            .await
            .map_err(|e| LifecycleError::init_failed(format!("schema sync failed: {e}")))?;
        tracing::info!("Products schema ready");
        Ok(())
    }
}

#[async_trait]
impl OnModuleDestroy for SeaOrmProductRepository {
    async fn on_module_destroy(&self) -> Result<(), LifecycleError> {
        tracing::info!("Closing database connection pool...");
        self.conn
            .clone()
            .close()
            .await
            .map_err(|e| LifecycleError::hook_failed("SeaOrmProductRepository", e.to_string()))
    }
}
