//! odonto-client
//!
//! HTTP/JSON clients for the two OdontoSuite backend services: the
//! admin service (cash register + appointments) and the patients
//! service (patients, odontogram, clinical events, treatment plans).
//! Service traits let the app layer run against fakes in tests.

pub mod cash;
pub mod config;
pub mod error;
mod http;
pub mod patients;

pub use cash::{CashApi, CashService};
pub use config::Backends;
pub use error::ApiError;
pub use patients::{PatientsApi, PatientsService};
