use crate::di::Container;
use crate::error::Result;

/// Trait for types that can be built from the DI container
///
/// Usually implemented through `#[derive(Injectable)]`, which resolves every
/// `Arc<T>` field by type and every `Arc<dyn Trait>` field through a binding.
///
/// # Example
/// ```ignore
/// use product_registry::DeriveInjectable as Injectable;
/// use std::sync::Arc;
///
/// #[derive(Injectable)]
/// pub struct ProductService {
///     repository: Arc<dyn ProductRepository>,
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Create an instance by resolving dependencies from the container
    ///
    /// # Errors
    /// Returns an error if any required dependency is not registered.
    fn inject(container: &Container) -> Result<Self>;
}
