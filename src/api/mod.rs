//! Twitter API module.
//!
//! This module provides:
//! - OAuth1 request signing
//! - The PIN-based authorization handshake
//! - A signed HTTP client behind the `FavoritesApi` trait
//! - API response types

pub mod auth;
pub mod client;
pub mod handshake;
pub mod types;

pub use auth::{ConsumerCredentials, TokenPair};
pub use client::{FavoritesApi, TwitterApi, DEFAULT_REQUEST_TIMEOUT, PAGE_SIZE};
pub use handshake::{authorize, Authorizer};
pub use types::*;
