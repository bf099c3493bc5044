//! # glowbridge-domain
//!
//! Pure domain model for the glowbridge smart-home fulfillment adapter.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Describe the **cloud API records** (devices, spaces, metadata, actions)
//! - Describe the **platform shapes** (intents, device descriptors, states,
//!   command results, response envelopes)
//! - Hold the pure mapping logic between the two:
//!   - discovery records → device descriptors
//!   - raw device / space state → state records
//!   - execute params → cloud action requests, outcomes → command results
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod cloud;
pub mod command;
pub mod descriptor;
pub mod envelope;
pub mod intent;
pub mod origin;
pub mod state;
