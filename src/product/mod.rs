//! Product records: model, persistence port, lifecycle service and routes.

pub mod controller;
#[cfg(feature = "sea-orm-db")]
pub mod entity;
pub mod error;
pub mod model;
pub mod repository;
#[cfg(feature = "sea-orm-db")]
pub mod sea_orm_repository;
pub mod service;

pub use controller::ProductController;
pub use error::{ProductError, ProductOperation};
pub use model::{
    NewProduct, Patch, Product, ProductCreateRequest, ProductId, ProductResponse,
    ProductUpdateRequest,
};
pub use repository::{
    InMemoryProductRepository, ProductRepository, RepositoryError, RepositoryResult,
};
#[cfg(feature = "sea-orm-db")]
pub use sea_orm_repository::SeaOrmProductRepository;
pub use service::ProductService;

use crate::di::Container;
use crate::error::Result;
use crate::module::{Module, provide};

/// Registers the product service and controller
///
/// Expects a `dyn ProductRepository` binding to be registered beforehand.
pub struct ProductModule;

impl Module for ProductModule {
    fn register(container: &mut Container) -> Result<()> {
        provide::<ProductService>(container)?;
        provide::<ProductController>(container)?;
        Ok(())
    }
}
