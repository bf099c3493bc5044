//! # glowbridge-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Receive fulfillment requests from the voice platform
//!   (`POST /fulfillment`, `POST /fulfillment/gateway`)
//! - Extract the caller's bearer token and hand it to the application layer
//! - Map application results into platform envelopes, and errors into
//!   status codes
//!
//! ## Dependency rule
//! Depends on `glowbridge-app` (for port traits and services) and
//! `glowbridge-domain` (for request/response types). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
