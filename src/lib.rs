//! Backend core for the tripdesk travel-booking service.
//!
//! The crate is organized around two booking workflows: room availability
//! checking with conflict-aware reservation creation, and tiered refund
//! calculation with bill settlement. HTTP routing, configuration, and
//! telemetry live at the edges; the decision logic itself is pure and
//! exercised directly by the module tests.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
