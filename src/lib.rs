//! # Product Registry
//!
//! An HTTP service for registering products, built on axum with a small
//! dependency-injection container.
//!
//! Every product route sits behind a bearer-token guard. Handlers delegate to
//! [`product::ProductService`], which enforces the lifecycle rules (existence
//! checks, name conflicts, partial updates) on top of a
//! [`product::ProductRepository`].
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use product_registry::app_module::AppModule;
//! use product_registry::config::{AppConfig, ConfigService};
//! use product_registry::product::InMemoryProductRepository;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_service(&ConfigService::from_env())?;
//! let address = config.bind_address();
//! let container = AppModule::container(config, Arc::new(InMemoryProductRepository::new()))?;
//! let router = AppModule::router(&container)?;
//!
//! let listener = tokio::net::TcpListener::bind(address).await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

// Lets `#[derive(Injectable)]` expand to `::product_registry::...` inside this crate.
extern crate self as product_registry;

pub mod app_module;
pub mod auth;
pub mod common;
pub mod config;
pub mod di;
pub mod error;
pub mod exception;
pub mod guard;
pub mod interceptor;
pub mod lifecycle;
pub mod module;
pub mod product;

pub use di::{Container, ContainerBuilder, Injectable};
pub use error::{RegistryError, Result};
pub use module::Module;

pub use registry_macro::Injectable as DeriveInjectable;

pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::di::{Container, ContainerBuilder, Injectable};
    pub use crate::error::{RegistryError, Result};
    pub use crate::exception::{ExceptionFilter, HttpException, HttpExceptionFilter};
    pub use crate::guard::{BearerAuthGuard, Guard, GuardError, GuardLayer, GuardResult};
    pub use crate::interceptor::{Interceptor, InterceptorLayer, Next};
    pub use crate::lifecycle::{
        Application, ApplicationBuilder, LifecycleError, LifecycleManager, OnModuleDestroy,
        OnModuleInit, shutdown_signal,
    };
    pub use crate::module::Module;
    pub use crate::DeriveInjectable as Injectable;
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
