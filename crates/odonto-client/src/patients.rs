//! Client for the patients service: patient records, odontogram,
//! clinical history, and treatment plans.

use async_trait::async_trait;
use tracing::debug;

use odonto_core::models::clinical_event::{ClinicalEvent, CreateClinicalEventRequest};
use odonto_core::models::odontogram::{Odontogram, OdontogramItemUpsert};
use odonto_core::models::patient::{CreatePatientRequest, Patient};
use odonto_core::models::treatment_plan::{
    CreateTreatmentPlanItemRequest, TreatmentPlanItem, TreatmentStatus,
    UpdateTreatmentPlanItemRequest,
};

use crate::error::ApiError;
use crate::http::{expect_json, expect_ok};

/// Operations of the patients/clinical service. The app layer depends
/// on this trait so tests can substitute an in-memory fake.
#[async_trait]
pub trait PatientsService: Send + Sync {
    async fn search_patients(&self, query: &str) -> Result<Vec<Patient>, ApiError>;
    async fn list_patients(&self, last_name: Option<&str>) -> Result<Vec<Patient>, ApiError>;
    async fn create_patient(&self, req: &CreatePatientRequest) -> Result<Patient, ApiError>;

    async fn odontogram(&self, patient_id: i64) -> Result<Odontogram, ApiError>;
    async fn upsert_odontogram_item(
        &self,
        patient_id: i64,
        req: &OdontogramItemUpsert,
    ) -> Result<Odontogram, ApiError>;
    async fn delete_odontogram_item(&self, patient_id: i64, item_id: i64) -> Result<(), ApiError>;

    async fn clinical_events(
        &self,
        patient_id: i64,
        limit: usize,
    ) -> Result<Vec<ClinicalEvent>, ApiError>;
    async fn create_clinical_event(
        &self,
        req: &CreateClinicalEventRequest,
    ) -> Result<ClinicalEvent, ApiError>;

    async fn treatment_plan(&self, patient_id: i64) -> Result<Vec<TreatmentPlanItem>, ApiError>;
    async fn create_plan_item(
        &self,
        req: &CreateTreatmentPlanItemRequest,
    ) -> Result<TreatmentPlanItem, ApiError>;
    async fn update_plan_status(
        &self,
        item_id: i64,
        status: TreatmentStatus,
    ) -> Result<TreatmentPlanItem, ApiError>;
    async fn update_plan_item(
        &self,
        item_id: i64,
        req: &UpdateTreatmentPlanItemRequest,
    ) -> Result<TreatmentPlanItem, ApiError>;
}

#[derive(Debug, Clone)]
pub struct PatientsApi {
    http: reqwest::Client,
    base_url: String,
}

impl PatientsApi {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PatientsService for PatientsApi {
    async fn search_patients(&self, query: &str) -> Result<Vec<Patient>, ApiError> {
        debug!(query, "searching patients");
        let resp = self
            .http
            .get(format!("{}/api/patients/search", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn list_patients(&self, last_name: Option<&str>) -> Result<Vec<Patient>, ApiError> {
        let mut req = self.http.get(format!("{}/api/patients", self.base_url));
        if let Some(ln) = last_name.map(str::trim).filter(|s| !s.is_empty()) {
            req = req.query(&[("lastName", ln)]);
        }
        expect_json(req.send().await?).await
    }

    async fn create_patient(&self, req: &CreatePatientRequest) -> Result<Patient, ApiError> {
        debug!(last_name = %req.last_name, "creating patient");
        let resp = self
            .http
            .post(format!("{}/api/patients", self.base_url))
            .json(req)
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn odontogram(&self, patient_id: i64) -> Result<Odontogram, ApiError> {
        debug!(patient_id, "fetching odontogram");
        let resp = self
            .http
            .get(format!("{}/api/patients/{patient_id}/odontogram", self.base_url))
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn upsert_odontogram_item(
        &self,
        patient_id: i64,
        req: &OdontogramItemUpsert,
    ) -> Result<Odontogram, ApiError> {
        debug!(patient_id, tooth = %req.tooth_code, surface = %req.surface, "upserting odontogram item");
        let resp = self
            .http
            .put(format!(
                "{}/api/patients/{patient_id}/odontogram/items",
                self.base_url
            ))
            .json(req)
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn delete_odontogram_item(&self, patient_id: i64, item_id: i64) -> Result<(), ApiError> {
        debug!(patient_id, item_id, "deleting odontogram item");
        let resp = self
            .http
            .delete(format!(
                "{}/api/patients/{patient_id}/odontogram/items/{item_id}",
                self.base_url
            ))
            .send()
            .await?;
        expect_ok(resp).await
    }

    async fn clinical_events(
        &self,
        patient_id: i64,
        limit: usize,
    ) -> Result<Vec<ClinicalEvent>, ApiError> {
        let resp = self
            .http
            .get(format!(
                "{}/api/patients/{patient_id}/clinical-events",
                self.base_url
            ))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn create_clinical_event(
        &self,
        req: &CreateClinicalEventRequest,
    ) -> Result<ClinicalEvent, ApiError> {
        debug!(patient_id = req.patient_id, kind = ?req.kind, "appending clinical event");
        let resp = self
            .http
            .post(format!("{}/api/clinical-events", self.base_url))
            .json(req)
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn treatment_plan(&self, patient_id: i64) -> Result<Vec<TreatmentPlanItem>, ApiError> {
        let resp = self
            .http
            .get(format!(
                "{}/api/patients/{patient_id}/treatment-plan",
                self.base_url
            ))
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn create_plan_item(
        &self,
        req: &CreateTreatmentPlanItemRequest,
    ) -> Result<TreatmentPlanItem, ApiError> {
        debug!(patient_id = req.patient_id, procedure = ?req.procedure, "creating plan item");
        let resp = self
            .http
            .post(format!("{}/api/treatment-plan/items", self.base_url))
            .json(req)
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn update_plan_status(
        &self,
        item_id: i64,
        status: TreatmentStatus,
    ) -> Result<TreatmentPlanItem, ApiError> {
        debug!(item_id, ?status, "updating plan status");
        let resp = self
            .http
            .patch(format!(
                "{}/api/treatment-plan/items/{item_id}/status",
                self.base_url
            ))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        expect_json(resp).await
    }

    async fn update_plan_item(
        &self,
        item_id: i64,
        req: &UpdateTreatmentPlanItemRequest,
    ) -> Result<TreatmentPlanItem, ApiError> {
        debug!(item_id, "updating plan item fields");
        let resp = self
            .http
            .patch(format!(
                "{}/api/treatment-plan/items/{item_id}",
                self.base_url
            ))
            .json(req)
            .send()
            .await?;
        expect_json(resp).await
    }
}
