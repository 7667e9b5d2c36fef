//! Cisco Support EoX API client library
//!
//! An async Rust client for Cisco's End-of-Life/End-of-Sale ("EoX") lookup
//! API. Handles the OAuth2 client-credentials login, in-memory token
//! caching with re-authentication on expiry, identifier batching, and
//! pagination of bulk `EOXByProductID` queries.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod rate_limit;
pub mod report;

mod client;

pub use client::*;
