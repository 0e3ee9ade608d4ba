//! Error types for Medius.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`BuildError`] - Errors while assembling a mediator
//! - [`DispatchError`] - Errors while dispatching a request
//!
//! Errors raised by handlers, handler factories and behaviors are carried
//! through [`DispatchError::Custom`] without rewrapping, so callers can
//! downcast to the original type.

use thiserror::Error;

use crate::response::Response;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The outcome of one dispatch: a type-erased response or the error that
/// ended the chain.
pub type DispatchResult = Result<Response, DispatchError>;

/// Errors that can occur while assembling a mediator.
///
/// Construction fails on the first invalid directive; no mediator is
/// produced.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A directive received an argument it cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Errors that can occur while dispatching a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No handler factory is registered for the request key.
    #[error("no handler registered for key: {0}")]
    HandlerNotFound(String),

    /// An error produced by a handler, handler factory or behavior.
    #[error(transparent)]
    Custom(BoxError),
}

impl DispatchError {
    /// Wraps an arbitrary error without losing the original.
    pub fn custom(err: impl Into<BoxError>) -> Self {
        DispatchError::Custom(err.into())
    }

    /// Returns the request key if this is a missing-handler error.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            DispatchError::HandlerNotFound(key) => Some(key),
            DispatchError::Custom(_) => None,
        }
    }
}

// Convenience conversions
impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Custom(err)
    }
}
