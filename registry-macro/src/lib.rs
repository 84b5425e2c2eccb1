use proc_macro::TokenStream;

mod injectable;

/// Derive macro for making a struct injectable into the DI container
///
/// Every field must be an `Arc<T>` (resolved by concrete type) or an
/// `Arc<dyn Trait>` (resolved through a trait binding).
///
/// # Example
/// ```ignore
/// use product_registry::DeriveInjectable as Injectable;
///
/// #[derive(Injectable)]
/// pub struct ProductService {
///     repository: Arc<dyn ProductRepository>,
/// }
/// ```
#[proc_macro_derive(Injectable)]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    injectable::derive_injectable(input)
}
