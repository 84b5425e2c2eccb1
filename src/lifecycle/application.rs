//! Application bootstrap with integrated lifecycle management

use super::{LifecycleError, LifecycleManager, OnModuleDestroy, OnModuleInit, Result};
use crate::di::Container;
use std::sync::Arc;
use std::time::Duration;

/// A wired container whose init hooks have run
///
/// # Example
///
/// ```rust,ignore
/// let app = Application::builder()
///     .container(container)
///     .register_lifecycle(repository, "ProductRepository")
///     .init_timeout(Duration::from_secs(30))
///     .build()
///     .await?;
///
/// // serve...
///
/// app.shutdown().await;
/// ```
pub struct Application {
    container: Arc<Container>,
    lifecycle_manager: LifecycleManager,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    pub fn lifecycle_manager(&self) -> &LifecycleManager {
        &self.lifecycle_manager
    }

    /// Run the OnModuleDestroy hooks
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down application...");
        let failures = self.lifecycle_manager.call_module_destroy().await;
        if failures > 0 {
            tracing::warn!("Application shutdown finished with {} failed hooks", failures);
        } else {
            tracing::info!("Application shutdown complete");
        }
    }
}

#[derive(Default)]
pub struct ApplicationBuilder {
    container: Option<Container>,
    lifecycle_manager: LifecycleManager,
    init_timeout: Option<Duration>,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    /// Set a timeout for the OnModuleInit phase
    pub fn init_timeout(mut self, timeout: Duration) -> Self {
        self.init_timeout = Some(timeout);
        self
    }

    pub fn on_init<T>(mut self, service: Arc<T>, name: impl Into<String>) -> Self
    where
        T: OnModuleInit + 'static,
    {
        self.lifecycle_manager.register_init(service, name);
        self
    }

    pub fn on_destroy<T>(mut self, service: Arc<T>, name: impl Into<String>) -> Self
    where
        T: OnModuleDestroy + 'static,
    {
        self.lifecycle_manager.register_destroy(service, name);
        self
    }

    /// Register a service for both init and destroy hooks
    pub fn register_lifecycle<T>(self, service: Arc<T>, name: impl Into<String>) -> Self
    where
        T: OnModuleInit + OnModuleDestroy + 'static,
    {
        let name = name.into();
        self.on_init(Arc::clone(&service), name.clone())
            .on_destroy(service, name)
    }

    /// Run the OnModuleInit hooks and return the application
    ///
    /// # Errors
    ///
    /// Returns an error if no container was provided or any init hook fails
    /// or times out.
    pub async fn build(self) -> Result<Application> {
        let container = self
            .container
            .ok_or_else(|| LifecycleError::init_failed("Container not provided"))?;

        tracing::info!("Starting application initialization...");

        match self.init_timeout {
            Some(timeout) => {
                self.lifecycle_manager
                    .call_module_init_with_timeout(timeout)
                    .await?
            }
            None => self.lifecycle_manager.call_module_init().await?,
        }

        tracing::info!("Application initialization complete");

        Ok(Application {
            container: Arc::new(container),
            lifecycle_manager: self.lifecycle_manager,
        })
    }
}
