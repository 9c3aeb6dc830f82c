//! Lumizo Core - Shared types library.
//!
//! This crate provides common types used across all Lumizo components:
//! - `storefront` - Cart and session state core
//! - `cli` - Command-line driver for the state core
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, price sets, and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
