//! # medius-std
//!
//! Standard implementations for the Medius request/response mediator.
//!
//! This crate provides:
//! - **The mediator**: [`Mediator`] and [`MediatorBuilder`]
//! - **The registry**: [`Registry`], the key-to-factory map behind the
//!   terminal dispatch step
//! - **Stock behaviors**: logging, validation, retry and (behind the
//!   `timeout` feature, on by default) timeout
//! - **Testing utilities**: canned behaviors, handlers and continuations
//!   in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use medius_core;

// Modules
pub mod behaviors;
pub mod registry;
pub mod testing;

mod mediator;
mod pipeline;

pub use mediator::{Mediator, MediatorBuilder};
pub use registry::Registry;
