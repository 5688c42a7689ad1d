//! odonto-app
//!
//! The session layer a UI binds to: per-patient workspace (chart,
//! history, treatment plan) with the advisory proposal chain, debounced
//! patient search with stale-response discarding, and the month
//! calendar view. All remote calls go through the service traits in
//! `odonto-client`, so every flow here is testable against fakes.

pub mod calendar;
pub mod error;
pub mod proposal;
pub mod search;
pub mod session;

pub use calendar::MonthView;
pub use error::AppError;
pub use proposal::{ChargeProposal, PendingProposal, PlanSuggestion};
pub use search::PatientSearch;
pub use session::{PatientWorkspace, Selection, SelectionToken};
