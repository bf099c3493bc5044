//! # glowbridge-adapter-cloud-reqwest
//!
//! Driven adapter talking HTTPS to the device cloud and the voice platform.
//!
//! ## Responsibilities
//! - Implement the `CloudApi` port with `reqwest` ([`CloudClient`])
//! - Implement the `StatePublisher` port ([`HomeGraphPublisher`])
//! - Follow `Link: <...>; rel="next"` pagination headers
//! - Map transport, status and decoding failures into domain errors
//!
//! ## Dependency rule
//! Depends on `glowbridge-app` (for port traits) and `glowbridge-domain`.
//! Nothing outside the composition root depends on this crate.

mod client;
pub mod config;
pub mod error;
mod homegraph;
pub mod link;

pub use client::CloudClient;
pub use config::CloudConfig;
pub use error::CloudError;
pub use homegraph::HomeGraphPublisher;
