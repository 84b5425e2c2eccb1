use anyhow::Context;
use product_registry::app_module::AppModule;
use product_registry::config::{AppConfig, ConfigService};
use product_registry::lifecycle::{Application, OnModuleDestroy, OnModuleInit, shutdown_signal};
use product_registry::product::{InMemoryProductRepository, ProductRepository};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting product registry...");

    // 1. Configuration (.env + process environment)
    let config =
        AppConfig::from_service(&ConfigService::from_env()).context("invalid configuration")?;
    let address = config.bind_address();

    // 2. Container, modules and lifecycle hooks
    let app = build_application(config).await?;

    // 3. Router
    let router = AppModule::router(app.container()).context("failed to build router")?;

    // 4. Serve until a shutdown signal arrives
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!("Server running on http://{}", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Initiating graceful shutdown...");
        })
        .await
        .context("server error")?;

    app.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn build_application(config: AppConfig) -> anyhow::Result<Application> {
    #[cfg(feature = "sea-orm-db")]
    if let Some(url) = config.database_url.clone() {
        tracing::info!("Using SeaORM product storage");
        let repository = product_registry::product::SeaOrmProductRepository::connect(&url)
            .await
            .context("failed to connect to database")?;
        return start(config, Arc::new(repository)).await;
    }

    #[cfg(not(feature = "sea-orm-db"))]
    if config.database_url.is_some() {
        tracing::warn!(
            "DATABASE_URL is set but the `sea-orm-db` feature is disabled; using in-memory storage"
        );
    }

    tracing::info!("Using in-memory product storage");
    start(config, Arc::new(InMemoryProductRepository::new())).await
}

async fn start<R>(config: AppConfig, repository: Arc<R>) -> anyhow::Result<Application>
where
    R: ProductRepository + OnModuleInit + OnModuleDestroy + 'static,
{
    let init_timeout = config.init_timeout;
    let container = AppModule::container(config, Arc::clone(&repository))
        .context("failed to register modules")?;

    Application::builder()
        .container(container)
        .register_lifecycle(repository, "ProductRepository")
        .init_timeout(init_timeout)
        .build()
        .await
        .context("failed to initialize application")
}
