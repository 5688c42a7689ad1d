//! odonto-core
//!
//! Pure domain types and logic for the OdontoSuite clinic client: tooth
//! codes, odontogram statuses, treatment-plan and appointment state
//! machines, and the chart/plan/cash mapping tables. No network, no
//! async — this is the shared vocabulary of the OdontoSuite system.

pub mod calendar;
pub mod chart;
pub mod error;
pub mod models;
