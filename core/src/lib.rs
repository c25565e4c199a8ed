//! Async API client core for the metrology equipment registry.
//!
//! # Overview
//! Issues HTTP requests to the registry service, maps equipment records into
//! typed structures, and derives a verification-lifecycle status for display
//! and filtering. The remote service is the consistency authority: nothing
//! is cached, and each call reflects server state at call time.
//!
//! # Design
//! - `EquipmentClient` is stateless — it holds only its transport, so
//!   concurrent calls are fully independent.
//! - The request layer bounds every call with a timeout and is permissive
//!   about empty bodies (204/205, non-JSON success responses).
//! - All failures propagate through the single [`ApiError`] channel; retry
//!   is the caller's decision.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod schedule;
pub mod types;

pub use client::EquipmentClient;
pub use config::Config;
pub use error::ApiError;
pub use schedule::{
    compute_next_verification, derive_status, derive_status_with_window, VerificationStatus,
};
pub use types::{CreateEquipment, Equipment, EquipmentState, ListParams, UpdateEquipment};
