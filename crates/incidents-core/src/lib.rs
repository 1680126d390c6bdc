//! Core types and trait definitions for the incident processor.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! record store and the business partner gateway are expressed as traits;
//! concrete backends live in their own crates.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod customer;
pub mod error;
pub mod gateway;
pub mod incident;
pub mod partner;
pub mod store;

pub use error::{Error, Result};
