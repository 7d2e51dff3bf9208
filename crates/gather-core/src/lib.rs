//! Core types and trait definitions for the Gather events service.
//!
//! This crate is deliberately free of IO and runtime dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod category;
pub mod error;
pub mod event;
pub mod format;
pub mod principal;
pub mod store;

pub use error::{Error, Result};
