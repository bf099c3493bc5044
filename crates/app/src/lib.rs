//! # glowbridge-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CloudApi` — the device cloud's REST surface
//!   - `StatePublisher` — the platform's report-state push
//! - Define the **use-cases** driven by inbound intents:
//!   - `SyncService` — discovery through the pagination walker
//!   - `QueryService` — per-target state aggregation
//!   - `ExecuteService` — command fan-out and outcome bookkeeping
//!   - `ReportStateService` — detached state pushes
//!   - `FulfillmentService` — intent routing and envelope assembly
//! - Keep every accumulator scoped to one invocation
//!
//! ## Dependency rule
//! Depends on `glowbridge-domain` only (plus `tokio` for spawning the detached
//! push). Never imports adapter crates. Adapters depend on *this* crate, not
//! the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
