//! workload-rs: resource workload engine.
//!
//! Distributes the remaining effort of assigned work items over each
//! resource's daily capacity, derives capacity/workload measures per day or
//! week, and projects the result into timeline pixel space. Data access and
//! output formatting stay outside the crate behind the `api` provider traits
//! and the `render::Renderer` contract.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{WorkloadChart, WorkloadConfig, WorkloadEngine};
pub use error::{WorkloadError, WorkloadResult};
