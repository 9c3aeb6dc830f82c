//! Lumizo Storefront state core.
//!
//! This crate provides the client-side state managers behind the Lumizo
//! storefront UI: the session store (who is logged in), the cart store
//! (what is being bought), and the durable key-value storage they persist
//! through. Presentation components are external collaborators consuming
//! the stores' data contracts; see the `lumizo-cli` crate for the
//! reference collaborator.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
