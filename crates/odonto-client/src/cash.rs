//! Client for the admin service: cash register and appointments.

use async_trait::async_trait;
use tracing::debug;

use odonto_core::calendar;
use odonto_core::models::appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest};
use odonto_core::models::cash::{CashSummary, CreateMoneyMovementRequest, MoneyMovement};

use crate::error::ApiError;
use crate::http::expect_json;

/// Operations of the cash/appointments service. The app layer depends
/// on this trait so tests can substitute an in-memory fake.
#[async_trait]
pub trait CashService: Send + Sync {
    async fn cash_summary(&self, from: &str, to: &str) -> Result<CashSummary, ApiError>;
    async fn movements(&self, from: &str, to: &str) -> Result<Vec<MoneyMovement>, ApiError>;
    async fn create_movement(
        &self,
        req: &CreateMoneyMovementRequest,
    ) -> Result<MoneyMovement, ApiError>;
    async fn appointments(&self, from: &str, to: &str) -> Result<Vec<Appointment>, ApiError>;
    async fn create_appointment(
        &self,
        req: &CreateAppointmentRequest,
    ) -> Result<Appointment, ApiError>;
    async fn update_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError>;
}

#[derive(Debug, Clone)]
pub struct CashApi {
    http: reqwest::Client,
    base_url: String,
}

impl CashApi {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Today's cash summary on the local wall clock.
    pub async fn today_summary(&self) -> Result<CashSummary, ApiError> {
        let (from, to) = calendar::today_range();
        self.cash_summary(&from, &to).await
    }

    /// Today's movements on the local wall clock.
    pub async fn today_movements(&self) -> Result<Vec<MoneyMovement>, ApiError> {
        let (from, to) = calendar::today_range();
        self.movements(&from, &to).await
    }

    /// Today's appointments on the local wall clock.
    pub async fn today_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let (from, to) = calendar::today_range();
        self.appointments(&from, &to).await
    }
}

#[async_trait]
impl CashService for CashApi {
    async fn cash_summary(&self, from: &str, to: &str) -> Result<CashSummary, ApiError> {
        debug!(from, to, "fetching cash summary");
        let resp = self
            .http
            .get(format!("{}/api/reports/cash/summary", self.base_url))
            .query(&[("from", from), ("to", to)])
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn movements(&self, from: &str, to: &str) -> Result<Vec<MoneyMovement>, ApiError> {
        debug!(from, to, "fetching movements");
        let resp = self
            .http
            .get(format!("{}/api/cash/movements", self.base_url))
            .query(&[("from", from), ("to", to)])
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn create_movement(
        &self,
        req: &CreateMoneyMovementRequest,
    ) -> Result<MoneyMovement, ApiError> {
        debug!(concept = ?req.concept, "creating movement");
        let resp = self
            .http
            .post(format!("{}/api/cash/movements", self.base_url))
            .json(req)
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn appointments(&self, from: &str, to: &str) -> Result<Vec<Appointment>, ApiError> {
        debug!(from, to, "fetching appointments");
        let resp = self
            .http
            .get(format!("{}/api/appointments", self.base_url))
            .query(&[("from", from), ("to", to)])
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn create_appointment(
        &self,
        req: &CreateAppointmentRequest,
    ) -> Result<Appointment, ApiError> {
        debug!(patient_id = req.patient_id, start = %req.start_time, "booking appointment");
        let resp = self
            .http
            .post(format!("{}/api/appointments", self.base_url))
            .json(req)
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn update_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        debug!(id, ?status, "updating appointment status");
        let resp = self
            .http
            .patch(format!("{}/api/appointments/{id}/status", self.base_url))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        expect_json(resp).await
    }
}
