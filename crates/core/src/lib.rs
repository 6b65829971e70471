//! Shopfront Core - Shared types library.
//!
//! This crate provides the types exchanged between Shopfront components:
//! - `storefront` - The storefront widget (catalog grid, cart, checkout)
//! - `backend` - The in-memory mock shop backend
//! - `cli` - Terminal driver for the widget
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and lets the widget and the backend agree on one wire format.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, products, cart items, and checkout payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
