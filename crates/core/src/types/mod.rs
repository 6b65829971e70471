//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the catalog and cart domain.

pub mod id;
pub mod order;
pub mod price;
pub mod product;

pub use id::*;
pub use order::{CartItem, CheckoutReceipt, CheckoutRequest, MessageResponse};
pub use price::{Price, PriceError, format_money};
pub use product::Product;
