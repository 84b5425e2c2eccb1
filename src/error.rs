use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Failures raised while wiring the application together.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Module registration failed: {message}")]
    ModuleRegistrationFailed { message: String },
}

impl RegistryError {
    pub fn not_found<T: ?Sized>() -> Self {
        Self::DependencyNotFound {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    pub fn downcast_failed<T: ?Sized>() -> Self {
        Self::DowncastFailed {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }
}
