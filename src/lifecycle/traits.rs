//! Lifecycle hook traits

use super::LifecycleError;
use async_trait::async_trait;

/// Called before the server starts accepting requests
///
/// Storage adapters use it to open connections or sync their schema.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl OnModuleInit for SeaOrmProductRepository {
///     async fn on_module_init(&self) -> Result<(), LifecycleError> {
///         self.sync_schema().await
///     }
/// }
/// ```
#[async_trait]
pub trait OnModuleInit: Send + Sync {
    async fn on_module_init(&self) -> Result<(), LifecycleError>;
}

/// Called during graceful shutdown, after the server stopped accepting requests
///
/// Hooks run in reverse registration order. A failing hook is logged and
/// does not prevent the remaining hooks from running.
#[async_trait]
pub trait OnModuleDestroy: Send + Sync {
    async fn on_module_destroy(&self) -> Result<(), LifecycleError>;
}
