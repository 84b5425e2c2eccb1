use crate::di::Container;
use crate::error::Result;

/// A group of providers registered into the container together
///
/// Implementors register their own providers in dependency order and may
/// register other modules first.
///
/// # Example
/// ```ignore
/// pub struct ProductModule;
///
/// impl Module for ProductModule {
///     fn register(container: &mut Container) -> Result<()> {
///         let service = ProductService::inject(container)?;
///         container.register(service);
///         Ok(())
///     }
/// }
/// ```
pub trait Module {
    /// Register all providers of this module
    fn register(container: &mut Container) -> Result<()>;
}

/// Build `T` from the container and register it.
pub fn provide<T: crate::di::Injectable>(container: &mut Container) -> Result<()> {
    let instance = T::inject(container)?;
    container.register(instance);
    Ok(())
}
