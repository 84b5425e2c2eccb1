//! Bearer credential validation

use crate::config::AppConfig;
use crate::di::Container;
use crate::error::Result;
use crate::guard::BearerAuthGuard;
use crate::module::{Module, provide};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer credentials")]
    MissingCredentials,

    #[error("Unsupported authorization scheme")]
    UnsupportedScheme,

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Decides whether a bearer token grants access
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> std::result::Result<(), AuthError>;
}

/// Accepts a fixed set of tokens taken from configuration
pub struct StaticTokenValidator {
    tokens: HashSet<String>,
}

impl StaticTokenValidator {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl TokenValidator for StaticTokenValidator {
    fn validate(&self, token: &str) -> std::result::Result<(), AuthError> {
        if token.is_empty() || !self.tokens.contains(token) {
            return Err(AuthError::InvalidToken);
        }
        Ok(())
    }
}

/// Registers the token validator binding and the bearer guard
///
/// Reads accepted tokens from the `AppConfig` registered in the container.
pub struct AuthModule;

impl Module for AuthModule {
    fn register(container: &mut Container) -> Result<()> {
        let config = container.resolve::<AppConfig>()?;
        container.register(StaticTokenValidator::new(config.auth_tokens.iter().cloned()));
        container.register_trait::<dyn TokenValidator, StaticTokenValidator, _>(|v| {
            v as Arc<dyn TokenValidator>
        });
        provide::<BearerAuthGuard>(container)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_validator() {
        let validator = StaticTokenValidator::new(["alpha", "beta"]);
        assert_eq!(validator.validate("alpha"), Ok(()));
        assert_eq!(validator.validate("beta"), Ok(()));
        assert_eq!(validator.validate("gamma"), Err(AuthError::InvalidToken));
        assert_eq!(validator.validate(""), Err(AuthError::InvalidToken));
    }
}
