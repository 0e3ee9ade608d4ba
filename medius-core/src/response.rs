//! The type-erased success value produced by a dispatch.

use std::any::Any;
use std::fmt;

/// The value a handler (or a short-circuiting behavior) returns on success.
///
/// Handlers for different request keys produce different concrete types, so
/// the chain carries them erased. Callers that know what a key produces
/// recover the value with [`Response::downcast`]:
///
/// ```
/// use medius_core::Response;
///
/// let response = Response::new(42u64);
/// assert_eq!(response.downcast_ref::<u64>(), Some(&42));
/// ```
pub struct Response {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Response {
    /// Erases `value` into a response.
    pub fn new<T: Send + 'static>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The response with no payload, for handlers that only have effects.
    pub fn empty() -> Self {
        Self::new(())
    }

    /// Returns `true` if the payload is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Returns `true` if the payload is the unit value.
    pub fn is_empty(&self) -> bool {
        self.is::<()>()
    }

    /// Takes the payload out as a `T`, or gives the response back on a
    /// type mismatch.
    pub fn downcast<T: 'static>(self) -> Result<T, Response> {
        let type_name = self.type_name;
        match self.value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Response { value, type_name }),
        }
    }

    /// Borrows the payload as a `T` if the types match.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Mutably borrows the payload as a `T` if the types match.
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut()
    }

    /// Name of the erased payload type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::empty()
    }
}
