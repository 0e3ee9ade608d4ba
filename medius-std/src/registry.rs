//! Key-to-factory registry behind the terminal dispatch step.

use std::collections::HashMap;
use std::sync::Arc;

use medius_core::{BuildError, DispatchError, HandlerFactory, Request};

/// Maps request keys to the factories that produce their handlers.
///
/// The registry is assembled through `MediatorBuilder` and frozen inside
/// the mediator afterwards; it holds no behavior logic and no dispatch
/// state. Registering a factory under a key that is already bound
/// replaces the previous binding, so the last registration wins.
#[derive(Default)]
pub struct Registry {
    handlers: HashMap<String, Arc<dyn HandlerFactory>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the prototype's key to `factory`, replacing any existing
    /// binding for that key.
    ///
    /// The prototype is only consulted for its key; the instance itself
    /// is not retained. An empty key is rejected because the terminal
    /// step could never resolve it.
    pub fn register(
        &mut self,
        prototype: &dyn Request,
        factory: Arc<dyn HandlerFactory>,
    ) -> Result<(), BuildError> {
        let key = prototype.key();
        if key.is_empty() {
            return Err(BuildError::InvalidArgument("request key must not be empty"));
        }
        self.handlers.insert(key.to_owned(), factory);
        Ok(())
    }

    /// Resolves the factory bound to `key`.
    pub fn lookup(&self, key: &str) -> Result<&dyn HandlerFactory, DispatchError> {
        self.handlers
            .get(key)
            .map(Arc::as_ref)
            .ok_or_else(|| DispatchError::HandlerNotFound(key.to_owned()))
    }

    /// Whether a factory is bound to `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no keys are bound.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates over the bound keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medius_core::{BoxError, Response, SharedHandler};

    struct Named(&'static str);

    impl Request for Named {
        fn key(&self) -> &str {
            self.0
        }
    }

    struct NoopHandler;

    impl medius_core::Handler for NoopHandler {
        async fn handle(
            &self,
            _ctx: &medius_core::Context,
            _request: &dyn Request,
        ) -> medius_core::DispatchResult {
            Ok(Response::empty())
        }
    }

    fn noop_factory() -> Result<SharedHandler, BoxError> {
        Ok(Arc::new(NoopHandler))
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .register(&Named(""), Arc::new(noop_factory))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidArgument(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = Registry::new();
        registry
            .register(&Named("job.run"), Arc::new(noop_factory))
            .unwrap();
        registry
            .register(&Named("job.run"), Arc::new(noop_factory))
            .unwrap();

        assert_eq!(registry.len(), 1, "same key must not grow the registry");
        assert!(registry.contains_key("job.run"));
    }

    #[test]
    fn test_lookup_of_unknown_key_names_the_key() {
        let registry = Registry::new();
        let err = registry.lookup("nope").err().unwrap();
        assert_eq!(err.missing_key(), Some("nope"));
    }
}
