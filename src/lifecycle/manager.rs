//! Lifecycle Manager
//!
//! Keeps the registered hooks and runs them in order.

use super::{LifecycleError, OnModuleDestroy, OnModuleInit, Result};
use std::sync::Arc;
use std::time::Duration;

struct LifecycleHook<T: ?Sized> {
    service: Arc<T>,
    name: String,
}

impl<T: ?Sized> LifecycleHook<T> {
    fn new(service: Arc<T>, name: impl Into<String>) -> Self {
        Self {
            service,
            name: name.into(),
        }
    }
}

/// Registers services with lifecycle hooks and executes them
///
/// # Example
///
/// ```rust,ignore
/// let mut manager = LifecycleManager::new();
/// manager.register_init(repository.clone(), "ProductRepository");
/// manager.register_destroy(repository, "ProductRepository");
///
/// manager.call_module_init().await?;
/// // ... application runs ...
/// manager.call_module_destroy().await;
/// ```
#[derive(Default)]
pub struct LifecycleManager {
    on_init_hooks: Vec<LifecycleHook<dyn OnModuleInit>>,
    on_destroy_hooks: Vec<LifecycleHook<dyn OnModuleDestroy>>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_init<T>(&mut self, service: Arc<T>, name: impl Into<String>)
    where
        T: OnModuleInit + 'static,
    {
        self.on_init_hooks
            .push(LifecycleHook::new(service as Arc<dyn OnModuleInit>, name));
    }

    pub fn register_destroy<T>(&mut self, service: Arc<T>, name: impl Into<String>)
    where
        T: OnModuleDestroy + 'static,
    {
        self.on_destroy_hooks
            .push(LifecycleHook::new(service as Arc<dyn OnModuleDestroy>, name));
    }

    /// Execute all OnModuleInit hooks in registration order
    ///
    /// Stops at the first failing hook.
    pub async fn call_module_init(&self) -> Result<()> {
        tracing::info!("Calling OnModuleInit hooks...");

        for hook in &self.on_init_hooks {
            tracing::debug!("Initializing: {}", hook.name);
            hook.service.on_module_init().await.map_err(|e| {
                tracing::error!("OnModuleInit failed for {}: {}", hook.name, e);
                LifecycleError::hook_failed(&hook.name, e.to_string())
            })?;
            tracing::debug!("Initialized: {}", hook.name);
        }

        tracing::info!(
            "OnModuleInit complete ({} hooks executed)",
            self.on_init_hooks.len()
        );
        Ok(())
    }

    pub async fn call_module_init_with_timeout(&self, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.call_module_init())
            .await
            .map_err(|_| {
                LifecycleError::timeout("OnModuleInit", format!("Timeout after {:?}", timeout))
            })?
    }

    /// Execute all OnModuleDestroy hooks in **reverse** registration order
    ///
    /// Returns the number of hooks that failed.
    pub async fn call_module_destroy(&self) -> usize {
        tracing::info!("Calling OnModuleDestroy hooks...");

        let mut failures = 0;
        for hook in self.on_destroy_hooks.iter().rev() {
            tracing::debug!("Destroying: {}", hook.name);
            if let Err(e) = hook.service.on_module_destroy().await {
                tracing::error!("OnModuleDestroy failed for {}: {}", hook.name, e);
                failures += 1;
            }
        }

        tracing::info!(
            "OnModuleDestroy complete ({} hooks executed, {} failed)",
            self.on_destroy_hooks.len(),
            failures
        );
        failures
    }

    pub fn init_hook_count(&self) -> usize {
        self.on_init_hooks.len()
    }

    pub fn destroy_hook_count(&self) -> usize {
        self.on_destroy_hooks.len()
    }
}
