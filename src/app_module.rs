use crate::auth::AuthModule;
use crate::config::AppConfig;
use crate::di::{Container, ContainerBuilder};
use crate::error::{RegistryError, Result};
use crate::exception::{ExceptionFilter, HttpExceptionFilter};
use crate::guard::{BearerAuthGuard, GuardLayer};
use crate::interceptor::{Interceptor, InterceptorLayer, LoggingInterceptor};
use crate::module::Module;
use crate::product::{ProductController, ProductModule, ProductRepository};
use axum::Router;
use axum::http::HeaderValue;
use axum::response::Response;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyCors, CorsLayer};

/// Root application module
///
/// Registers authentication and products. The configuration and the product
/// repository binding must already be in the container.
pub struct AppModule;

impl Module for AppModule {
    fn register(container: &mut Container) -> Result<()> {
        AuthModule::register(container)?;
        ProductModule::register(container)?;
        Ok(())
    }
}

impl AppModule {
    /// Container with `config`, `repository` bound as `dyn ProductRepository`,
    /// and every module registered.
    pub fn container<R>(config: AppConfig, repository: Arc<R>) -> Result<Container>
    where
        R: ProductRepository + 'static,
    {
        let mut container = ContainerBuilder::new()
            .register(config)
            .register_arc(repository)
            .bind::<dyn ProductRepository, R, _>(|r| r as Arc<dyn ProductRepository>)
            .build();

        Self::register(&mut container)?;
        Ok(container)
    }

    /// Product routes behind the bearer guard, wrapped in request logging,
    /// panic recovery and CORS.
    pub fn router(container: &Container) -> Result<Router> {
        let config = container.resolve::<AppConfig>()?;
        let controller = container.resolve::<ProductController>()?;
        let guard = container.resolve::<BearerAuthGuard>()?;

        tracing::debug!("Mapping {} routes", ProductController::base_path());
        let products = ProductController::router(controller)
            .route_layer(GuardLayer::new(guard));

        let logging: Arc<dyn Interceptor> = Arc::new(LoggingInterceptor);
        Ok(Router::new()
            .merge(products)
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(InterceptorLayer::new(vec![logging]))
            .layer(cors_layer(&config)?))
    }
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    HttpExceptionFilter.catch_panic(panic)
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let origin = match &config.cors_allow_origin {
        None => AllowOrigin::any(),
        Some(origin) => {
            let value = HeaderValue::from_str(origin).map_err(|e| {
                RegistryError::ModuleRegistrationFailed {
                    message: format!("invalid CORS origin {origin:?}: {e}"),
                }
            })?;
            AllowOrigin::exact(value)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AnyCors)
        .allow_headers(AnyCors))
}
