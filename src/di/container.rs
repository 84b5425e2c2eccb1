use crate::error::{RegistryError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

type AnyArc = Arc<dyn Any + Send + Sync>;

/// Turns the stored concrete instance into an `Arc<dyn Trait>` boxed as `AnyArc`.
/// Returns `None` when the stored instance is not the bound implementation.
type CasterFn = Arc<dyn Fn(AnyArc) -> Option<AnyArc> + Send + Sync>;

/// Thread-safe dependency injection container.
///
/// Instances are stored once, behind an `Arc`, and handed out by cloning that
/// `Arc`. Trait bindings map `dyn Trait` to the concrete type that implements it.
#[derive(Clone, Default)]
pub struct Container {
    services: DashMap<TypeId, AnyArc>,
    bindings: DashMap<TypeId, Binding>,
}

#[derive(Clone)]
struct Binding {
    implementation: TypeId,
    caster: CasterFn,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.register_arc(Arc::new(instance))
    }

    /// Register an instance that is already shared elsewhere, e.g. with the
    /// lifecycle manager, so both sides see the same object.
    pub fn register_arc<T: 'static + Send + Sync>(&mut self, instance: Arc<T>) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), instance);
        self
    }

    pub fn register_trait<Trait, Impl, F>(&mut self, caster_fn: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        let caster: CasterFn = Arc::new(move |instance: AnyArc| {
            let concrete = instance.downcast::<Impl>().ok()?;
            let trait_obj: Arc<Trait> = caster_fn(concrete);
            Some(Arc::new(trait_obj) as AnyArc)
        });

        self.bindings.insert(
            TypeId::of::<Trait>(),
            Binding {
                implementation: TypeId::of::<Impl>(),
                caster,
            },
        );
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let instance = self
            .services
            .get(&TypeId::of::<T>())
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(RegistryError::not_found::<T>)?;

        instance
            .downcast::<T>()
            .map_err(|_| RegistryError::downcast_failed::<T>())
    }

    pub fn resolve_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let binding = self
            .bindings
            .get(&TypeId::of::<T>())
            .map(|entry| entry.value().clone())
            .ok_or_else(RegistryError::not_found::<T>)?;

        let instance = self
            .services
            .get(&binding.implementation)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistryError::DependencyNotFound {
                type_name: format!(
                    "implementation bound to '{}' is not registered",
                    std::any::type_name::<T>()
                ),
            })?;

        // The caster yields an `Arc<dyn Any>` wrapping an `Arc<T>`.
        let wrapper = (binding.caster)(instance)
            .ok_or_else(RegistryError::downcast_failed::<T>)?
            .downcast::<Arc<T>>()
            .map_err(|_| RegistryError::downcast_failed::<T>())?;

        Ok(Arc::clone(wrapper.as_ref()))
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.services.contains_key(&type_id) || self.bindings.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Catalog {
        size: usize,
    }

    trait PriceSource: Send + Sync {
        fn price_of(&self, name: &str) -> f64;
    }

    struct FlatPrice(f64);

    impl PriceSource for FlatPrice {
        fn price_of(&self, _name: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut container = Container::new();
        container.register(Catalog { size: 3 });
        let catalog = container.resolve::<Catalog>().unwrap();
        assert_eq!(catalog.size, 3);
    }

    #[test]
    fn test_register_and_resolve_trait() {
        let mut container = Container::new();
        container.register(FlatPrice(9.99));
        container.register_trait::<dyn PriceSource, FlatPrice, _>(|p| p as Arc<dyn PriceSource>);

        assert!(container.contains::<dyn PriceSource>());
        let source = container.resolve_trait::<dyn PriceSource>().unwrap();
        assert_eq!(source.price_of("Widget"), 9.99);
    }

    #[test]
    fn test_register_arc_shares_instance() {
        let shared = Arc::new(Catalog { size: 1 });
        let mut container = Container::new();
        container.register_arc(Arc::clone(&shared));

        let resolved = container.resolve::<Catalog>().unwrap();
        assert!(Arc::ptr_eq(&shared, &resolved));
    }

    #[test]
    fn test_missing_dependency() {
        let container = Container::new();
        assert!(matches!(
            container.resolve::<Catalog>(),
            Err(RegistryError::DependencyNotFound { .. })
        ));
        assert!(matches!(
            container.resolve_trait::<dyn PriceSource>(),
            Err(RegistryError::DependencyNotFound { .. })
        ));
    }

    #[test]
    fn test_binding_without_implementation() {
        let mut container = Container::new();
        container.register_trait::<dyn PriceSource, FlatPrice, _>(|p| p as Arc<dyn PriceSource>);

        let err = container.resolve_trait::<dyn PriceSource>().err().unwrap();
        assert!(err.to_string().contains("is not registered"));
    }
}
