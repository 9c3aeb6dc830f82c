//! Core types for Lumizo.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod username;

pub use id::{LineId, ProductId};
pub use price::{PriceSet, PriceType};
pub use username::{Username, UsernameError};
