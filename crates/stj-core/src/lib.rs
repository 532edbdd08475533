//! Core types and trait definitions for the STJ case registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store and API crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod case;
pub mod error;
pub mod stage;
pub mod store;

pub use error::{Error, Result};
