use crate::di::{Container, Injectable};
use crate::error::Result;
use std::sync::Arc;

/// Builder for the dependency injection container
///
/// # Example
/// ```ignore
/// let container = ContainerBuilder::new()
///     .register(InMemoryProductRepository::new())
///     .bind::<dyn ProductRepository, InMemoryProductRepository, _>(|r| r)
///     .build();
/// ```
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            container: Container::new(),
        }
    }

    /// Register a service instance
    pub fn register<T: 'static + Send + Sync>(mut self, instance: T) -> Self {
        self.container.register(instance);
        self
    }

    /// Register an instance that is shared with another owner
    pub fn register_arc<T: 'static + Send + Sync>(mut self, instance: Arc<T>) -> Self {
        self.container.register_arc(instance);
        self
    }

    /// Build `T` from what is registered so far and register it
    pub fn provide<T: Injectable>(mut self) -> Result<Self> {
        let instance = T::inject(&self.container)?;
        self.container.register(instance);
        Ok(self)
    }

    /// Bind a trait to a concrete implementation
    ///
    /// Enables resolving `Arc<dyn Trait>` to the registered implementation.
    pub fn bind<Trait, Impl, F>(mut self, caster: F) -> Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        self.container.register_trait::<Trait, Impl, F>(caster);
        self
    }

    pub fn build(self) -> Container {
        self.container
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
