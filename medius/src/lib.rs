//! # medius - In-Process Request/Response Mediator
//!
//! `medius` dispatches request values to exactly one registered handler,
//! routed by a string key and wrapped in a composable chain of behaviors.
//! Senders depend on the mediator alone; handlers and the middleware that
//! surrounds them stay invisible to the call site.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use medius::{Context, Handler, Mediator, Request, Response};
//!
//! struct Ping;
//!
//! impl Request for Ping {
//!     fn key(&self) -> &str {
//!         "ping"
//!     }
//! }
//!
//! struct PingHandler;
//!
//! impl Handler for PingHandler {
//!     async fn handle(&self, _ctx: &Context, _request: &dyn Request) -> medius::DispatchResult {
//!         Ok(Response::new("pong"))
//!     }
//! }
//!
//! let mediator = Mediator::builder()
//!     .with_handler(&Ping, PingHandler)
//!     .with_behavior(medius::behaviors::LoggingBehavior::new())
//!     .build()?;
//!
//! let response = mediator.send(&Context::background(), &Ping).await?;
//! assert_eq!(response.downcast_ref::<&str>(), Some(&"pong"));
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use medius_core::{
    // Behavior
    Behavior,
    BehaviorFn,
    // Error types
    BoxError,
    BoxFuture,
    BuildError,
    // Context
    CancelHandle,
    Context,
    Continuation,
    DispatchError,
    DispatchResult,
    DynBehavior,
    // Handler
    DynHandler,
    // Sender
    DynSender,
    Handler,
    HandlerFactory,
    Next,
    // Request / Response
    Request,
    Response,
    Sender,
    SharedHandler,
};

pub use medius_std::{Mediator, MediatorBuilder, Registry};

/// Standard behavior implementations.
pub mod behaviors {
    #![allow(clippy::wildcard_imports)]
    pub use medius_std::behaviors::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use medius_std::testing::*;
}

/// Prelude module - common imports for Medius.
///
/// # Usage
///
/// ```rust,ignore
/// use medius::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Core traits
        Behavior,
        // Errors
        BoxError,
        Context,
        DispatchError,
        DispatchResult,
        Handler,
        HandlerFactory,
        // Assembly
        Mediator,
        MediatorBuilder,
        Next,
        Request,
        // Response
        Response,
        Sender,
    };
}

#[cfg(feature = "macros")]
pub use medius_macros::Request;
