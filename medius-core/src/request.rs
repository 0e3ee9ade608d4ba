//! Request trait for dispatchable message types.

use std::any::Any;

/// A message that can be dispatched through a mediator.
///
/// The [`key`](Request::key) identifies which registered handler factory
/// serves the request. Keys are plain strings by convention: several
/// request shapes may share a key, and the handler bound to that key is
/// expected to know what it receives.
///
/// Requests must be `Send + Sync + 'static` to be safe for async use; the
/// `Any` supertrait lets handlers recover the concrete type from the
/// erased `&dyn Request` the chain carries.
///
/// # Example
///
/// ```rust
/// use medius_core::Request;
///
/// struct CreateUser { name: String }
///
/// impl Request for CreateUser {
///     fn key(&self) -> &str {
///         "user.create"
///     }
/// }
///
/// let request = CreateUser { name: "ada".into() };
/// let erased: &dyn Request = &request;
/// assert_eq!(erased.key(), "user.create");
/// assert_eq!(erased.downcast_ref::<CreateUser>().map(|r| r.name.as_str()), Some("ada"));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Request",
    label = "must be `Send + Sync + 'static` and provide a key",
    note = "Implement `Request` (or derive it) so the mediator can route this type."
)]
pub trait Request: Any + Send + Sync {
    /// Stable identifier used to look up the handler factory.
    fn key(&self) -> &str;
}

impl dyn Request {
    /// Borrows the concrete request if it is a `T`.
    pub fn downcast_ref<T: Request>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }

    /// Returns `true` if the concrete request is a `T`.
    pub fn is<T: Request>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }
}
