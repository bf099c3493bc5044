//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod execute_service;
pub mod fulfillment_service;
pub mod pagination;
pub mod query_service;
pub mod report_state_service;
pub mod sync_service;
