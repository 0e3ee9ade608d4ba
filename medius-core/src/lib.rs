//! # medius-core
//!
//! Core traits for the Medius request/response mediator.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! code that defines requests, handlers or behaviors without needing the
//! full `medius-std` machinery.
//!
//! # The Dispatch Chain
//!
//! A dispatch travels through three kinds of participants, each defined
//! here as a trait:
//!
//! ## Requests ([`Request`])
//!
//! A request is any `Send + Sync + 'static` value that names the handler
//! it wants via [`Request::key`]. The chain carries requests type-erased
//! as `&dyn Request`; handlers recover the concrete type with the
//! downcast helpers.
//!
//! ## Behaviors ([`Behavior`])
//!
//! Behaviors are the middleware of the chain. Each wraps everything
//! registered after it plus the handler, receives a [`Next`] continuation,
//! and may pass through, short-circuit, rewrite the outcome or re-run the
//! remainder.
//!
//! ## Handlers ([`Handler`])
//!
//! The terminal point where business logic runs. Handlers are produced by
//! a [`HandlerFactory`] once per dispatch, so whether an instance is
//! shared across dispatches is the factory's choice, not the mediator's.
//!
//! Alongside the participants, [`Context`] carries the caller's
//! cancellation and deadline signals through the chain, and
//! [`Sender`] is the capability trait the standard mediator implements.
//!
//! # Error Types
//!
//! - [`BuildError`] - Mediator assembly errors
//! - [`DispatchError`] - Dispatch-time errors; foreign errors travel
//!   through it untouched

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod behavior;
mod context;
mod error;
mod handler;
mod request;
mod response;
mod sender;

// Re-exports
pub use behavior::{Behavior, BehaviorFn, Continuation, DynBehavior, Next};
pub use context::{CancelHandle, Context};
pub use error::{BoxError, BuildError, DispatchError, DispatchResult};
pub use handler::{BoxFuture, DynHandler, Handler, HandlerFactory, SharedHandler};
pub use request::Request;
pub use response::Response;
pub use sender::{DynSender, Sender};
