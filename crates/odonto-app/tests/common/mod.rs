#![allow(dead_code)]

//! In-memory fakes for the two backend services. They mimic the real
//! upsert/append semantics and record every call so tests can assert
//! that an operation issued no request.

use std::sync::Mutex;

use async_trait::async_trait;

use odonto_client::{ApiError, CashService, PatientsService};
use odonto_core::models::appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest};
use odonto_core::models::cash::{CashSummary, CreateMoneyMovementRequest, MoneyMovement};
use odonto_core::models::clinical_event::{ClinicalEvent, CreateClinicalEventRequest};
use odonto_core::models::odontogram::{Odontogram, OdontogramItem, OdontogramItemUpsert};
use odonto_core::models::patient::{CreatePatientRequest, Patient};
use odonto_core::models::treatment_plan::{
    CreateTreatmentPlanItemRequest, TreatmentPlanItem, TreatmentStatus,
    UpdateTreatmentPlanItemRequest,
};

pub const PATIENT_ID: i64 = 7;

pub fn patient(id: i64, last_name: &str, active: bool) -> Patient {
    Patient {
        id,
        first_name: "Ana".to_string(),
        last_name: last_name.to_string(),
        document_number: format!("3000000{id}"),
        birth_date: None,
        phone: None,
        email: None,
        address: None,
        insurance_name: None,
        insurance_number: None,
        active,
    }
}

#[derive(Default)]
pub struct ClinicState {
    next_id: i64,
    pub patients: Vec<Patient>,
    pub chart_items: Vec<OdontogramItem>,
    pub events: Vec<ClinicalEvent>,
    pub plan: Vec<TreatmentPlanItem>,
    /// Method names, in call order.
    pub calls: Vec<String>,
    pub fail_event_append: bool,
    pub fail_status_update: bool,
}

impl ClinicState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct FakeClinic {
    pub state: Mutex<ClinicState>,
}

impl FakeClinic {
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == name).count()
    }

    pub fn fail_event_append(&self, fail: bool) {
        self.state.lock().unwrap().fail_event_append = fail;
    }

    pub fn fail_status_update(&self, fail: bool) {
        self.state.lock().unwrap().fail_status_update = fail;
    }

    pub fn seed_plan_item(&self, item: TreatmentPlanItem) {
        self.state.lock().unwrap().plan.push(item);
    }

    fn chart(state: &ClinicState) -> Odontogram {
        Odontogram {
            odontogram_id: 1,
            patient_id: PATIENT_ID,
            items: state.chart_items.clone(),
        }
    }
}

pub fn plan_item(
    id: i64,
    procedure: odonto_core::models::treatment_plan::TreatmentProcedure,
    status: TreatmentStatus,
    tooth: Option<&str>,
    surface: Option<odonto_core::models::tooth::ToothSurface>,
) -> TreatmentPlanItem {
    TreatmentPlanItem {
        id,
        patient_id: PATIENT_ID,
        procedure,
        status,
        tooth_code: tooth.map(|t| t.parse().unwrap()),
        surface,
        estimated_cost: "10000".to_string(),
        final_cost: None,
        notes: None,
        created_at: "2024-03-01T09:00:00".to_string(),
        updated_at: "2024-03-01T09:00:00".to_string(),
    }
}

#[async_trait]
impl PatientsService for FakeClinic {
    async fn search_patients(&self, query: &str) -> Result<Vec<Patient>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("search_patients".to_string());
        let q = query.to_lowercase();
        Ok(state
            .patients
            .iter()
            .filter(|p| p.last_name.to_lowercase().contains(&q))
            .cloned()
            .collect())
    }

    async fn list_patients(&self, _last_name: Option<&str>) -> Result<Vec<Patient>, ApiError> {
        let state = self.state.lock().unwrap();
        Ok(state.patients.clone())
    }

    async fn create_patient(&self, req: &CreatePatientRequest) -> Result<Patient, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_patient".to_string());
        let id = state.next_id();
        let mut p = patient(id, &req.last_name, true);
        p.first_name = req.first_name.clone();
        p.document_number = req.document_number.clone();
        state.patients.push(p.clone());
        Ok(p)
    }

    async fn odontogram(&self, _patient_id: i64) -> Result<Odontogram, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("odontogram".to_string());
        Ok(Self::chart(&state))
    }

    async fn upsert_odontogram_item(
        &self,
        _patient_id: i64,
        req: &OdontogramItemUpsert,
    ) -> Result<Odontogram, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("upsert_odontogram_item".to_string());
        let id = state.next_id();
        if let Some(existing) = state
            .chart_items
            .iter_mut()
            .find(|it| it.tooth_code == req.tooth_code && it.surface == req.surface)
        {
            existing.status = req.status;
            existing.note = req.note.clone();
        } else {
            state.chart_items.push(OdontogramItem {
                id,
                tooth_code: req.tooth_code.clone(),
                surface: req.surface,
                status: req.status,
                note: req.note.clone(),
            });
        }
        Ok(Self::chart(&state))
    }

    async fn delete_odontogram_item(&self, _patient_id: i64, item_id: i64) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("delete_odontogram_item".to_string());
        state.chart_items.retain(|it| it.id != item_id);
        Ok(())
    }

    async fn clinical_events(
        &self,
        _patient_id: i64,
        limit: usize,
    ) -> Result<Vec<ClinicalEvent>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("clinical_events".to_string());
        Ok(state.events.iter().take(limit).cloned().collect())
    }

    async fn create_clinical_event(
        &self,
        req: &CreateClinicalEventRequest,
    ) -> Result<ClinicalEvent, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_clinical_event".to_string());
        if state.fail_event_append {
            return Err(ApiError::status(500, "event store unavailable"));
        }
        let id = state.next_id();
        let event = ClinicalEvent {
            id,
            patient_id: req.patient_id,
            kind: req.kind,
            tooth_code: req.tooth_code.clone(),
            surface: req.surface,
            from_status: req.from_status,
            to_status: req.to_status,
            note: req.note.clone(),
            created_at: "2024-03-05T10:00:00".to_string(),
        };
        state.events.insert(0, event.clone());
        Ok(event)
    }

    async fn treatment_plan(&self, _patient_id: i64) -> Result<Vec<TreatmentPlanItem>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("treatment_plan".to_string());
        Ok(state.plan.clone())
    }

    async fn create_plan_item(
        &self,
        req: &CreateTreatmentPlanItemRequest,
    ) -> Result<TreatmentPlanItem, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_plan_item".to_string());
        let id = state.next_id();
        let item = TreatmentPlanItem {
            id,
            patient_id: req.patient_id,
            procedure: req.procedure,
            status: req.status,
            tooth_code: req.tooth_code.clone(),
            surface: req.surface,
            estimated_cost: req.estimated_cost.clone(),
            final_cost: None,
            notes: req.notes.clone(),
            created_at: "2024-03-05T10:00:00".to_string(),
            updated_at: "2024-03-05T10:00:00".to_string(),
        };
        state.plan.insert(0, item.clone());
        Ok(item)
    }

    async fn update_plan_status(
        &self,
        item_id: i64,
        status: TreatmentStatus,
    ) -> Result<TreatmentPlanItem, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("update_plan_status".to_string());
        if state.fail_status_update {
            return Err(ApiError::status(409, "stale item version"));
        }
        let item = state
            .plan
            .iter_mut()
            .find(|it| it.id == item_id)
            .ok_or_else(|| ApiError::status(404, "no such item"))?;
        item.status = status;
        Ok(item.clone())
    }

    async fn update_plan_item(
        &self,
        item_id: i64,
        req: &UpdateTreatmentPlanItemRequest,
    ) -> Result<TreatmentPlanItem, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("update_plan_item".to_string());
        let item = state
            .plan
            .iter_mut()
            .find(|it| it.id == item_id)
            .ok_or_else(|| ApiError::status(404, "no such item"))?;
        if let Some(fc) = &req.final_cost {
            item.final_cost = Some(fc.clone());
        }
        if let Some(n) = &req.notes {
            item.notes = Some(n.clone());
        }
        Ok(item.clone())
    }
}

#[derive(Default)]
pub struct CashState {
    next_id: i64,
    pub movements: Vec<MoneyMovement>,
    pub appointments: Vec<Appointment>,
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeCash {
    pub state: Mutex<CashState>,
}

impl FakeCash {
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == name).count()
    }

    pub fn seed_appointment(&self, appt: Appointment) {
        self.state.lock().unwrap().appointments.push(appt);
    }
}

pub fn appointment(id: i64, start: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        patient_id: PATIENT_ID,
        start_time: start.to_string(),
        end_time: None,
        status,
        reason: None,
        notes: None,
        created_late: false,
        created_at: "2024-03-01T08:00:00".to_string(),
        updated_at: "2024-03-01T08:00:00".to_string(),
    }
}

#[async_trait]
impl CashService for FakeCash {
    async fn cash_summary(&self, from: &str, to: &str) -> Result<CashSummary, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("cash_summary".to_string());
        Ok(CashSummary {
            from: from.to_string(),
            to: to.to_string(),
            total_income: "0".to_string(),
            total_expense: "0".to_string(),
            net_total: "0".to_string(),
        })
    }

    async fn movements(&self, _from: &str, _to: &str) -> Result<Vec<MoneyMovement>, ApiError> {
        let state = self.state.lock().unwrap();
        Ok(state.movements.clone())
    }

    async fn create_movement(
        &self,
        req: &CreateMoneyMovementRequest,
    ) -> Result<MoneyMovement, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_movement".to_string());
        let id = state.next_id + 1;
        state.next_id = id;
        let movement = MoneyMovement {
            id,
            movement_nature: req.concept.nature(),
            amount: req.amount.clone(),
            currency: "ARS".to_string(),
            patient_id: req.patient_id,
            appointment_id: req.appointment_id,
            description: req.description.clone(),
            created_at: "2024-03-05T10:00:00".to_string(),
        };
        state.movements.push(movement.clone());
        Ok(movement)
    }

    async fn appointments(&self, _from: &str, _to: &str) -> Result<Vec<Appointment>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("appointments".to_string());
        Ok(state.appointments.clone())
    }

    async fn create_appointment(
        &self,
        req: &CreateAppointmentRequest,
    ) -> Result<Appointment, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_appointment".to_string());
        let id = state.next_id + 1;
        state.next_id = id;
        let appt = Appointment {
            id,
            patient_id: req.patient_id,
            start_time: req.start_time.clone(),
            end_time: req.end_time.clone(),
            status: AppointmentStatus::Scheduled,
            reason: req.reason.clone(),
            notes: req.notes.clone(),
            created_late: false,
            created_at: "2024-03-01T08:00:00".to_string(),
            updated_at: "2024-03-01T08:00:00".to_string(),
        };
        state.appointments.push(appt.clone());
        Ok(appt)
    }

    async fn update_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("update_appointment_status".to_string());
        let appt = state
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ApiError::status(404, "no such appointment"))?;
        appt.status = status;
        Ok(appt.clone())
    }
}
