//! Per-patient clinical session: the loaded chart, history and
//! treatment plan, the edit flows that keep them consistent, and the
//! advisory proposal chain.
//!
//! Multi-step flows (upsert → event → suggestion → plan creation →
//! reflect-to-chart → charge) are sequential, not atomic: the user may
//! abandon any link by declining the pending proposal. Same-key races
//! (two edits of one tooth in flight at once) are not guarded — the
//! last response to arrive wins.

use tracing::{info, warn};

use odonto_client::{CashService, PatientsService};
use odonto_core::chart::effective_surface;
use odonto_core::error::CoreError;
use odonto_core::models::cash::{CreateMoneyMovementRequest, MoneyMovement, PaymentMethod};
use odonto_core::models::clinical_event::{ClinicalEvent, CreateClinicalEventRequest};
use odonto_core::models::odontogram::{Odontogram, OdontogramItemUpsert, OdontogramStatus};
use odonto_core::models::patient::Patient;
use odonto_core::models::tooth::{ToothCode, ToothSurface};
use odonto_core::models::treatment_plan::{
    CreateTreatmentPlanItemRequest, TreatmentPlanItem, TreatmentProcedure, TreatmentStatus,
    UpdateTreatmentPlanItemRequest,
};

use crate::error::AppError;
use crate::proposal::{ChargeProposal, PendingProposal, PlanSuggestion};

/// How much history the session loads up front.
const EVENT_PAGE: usize = 50;

/// Everything the clinical screen holds for one selected patient.
#[derive(Debug)]
pub struct PatientWorkspace {
    pub patient_id: i64,
    pub chart: Odontogram,
    /// Newest first, as the service returns them.
    pub events: Vec<ClinicalEvent>,
    /// Newest first; items created here are inserted at the front.
    pub plan: Vec<TreatmentPlanItem>,
    pending: Option<PendingProposal>,
}

impl PatientWorkspace {
    /// Fetch the chart, recent history and treatment plan for a patient.
    pub async fn load(svc: &impl PatientsService, patient_id: i64) -> Result<Self, AppError> {
        let (chart, events, plan) = tokio::try_join!(
            svc.odontogram(patient_id),
            svc.clinical_events(patient_id, EVENT_PAGE),
            svc.treatment_plan(patient_id),
        )?;
        Ok(Self {
            patient_id,
            chart,
            events,
            plan,
            pending: None,
        })
    }

    /// The proposal awaiting confirmation, if any.
    pub fn pending(&self) -> Option<&PendingProposal> {
        self.pending.as_ref()
    }

    /// Decline whatever is pending. Abandoning a proposal is never an
    /// error; the rest of the chain simply does not run.
    pub fn decline_pending(&mut self) {
        self.pending = None;
    }

    /// Record one finding: upsert the chart item and append the
    /// matching ODONTOGRAM_CHANGE event, then maybe propose a plan item.
    ///
    /// Whole-tooth statuses must arrive with surface already coerced to
    /// GENERAL (see [`effective_surface`]); anything else is rejected
    /// before any network call.
    pub async fn record_finding(
        &mut self,
        svc: &impl PatientsService,
        tooth: ToothCode,
        surface: ToothSurface,
        status: OdontogramStatus,
        note: &str,
    ) -> Result<(), AppError> {
        if status.requires_general() && surface != ToothSurface::General {
            return Err(CoreError::SurfaceRequiresGeneral { status }.into());
        }
        let note = normalize_note(note);

        self.write_finding(svc, tooth.clone(), surface, status, note.clone())
            .await?;
        self.maybe_suggest_plan_item(tooth, surface, status, note);
        Ok(())
    }

    /// Chart write plus history append. The write is the source of
    /// truth; the append records what it did. An append failure after a
    /// successful write surfaces as the distinct partial-failure error.
    async fn write_finding(
        &mut self,
        svc: &impl PatientsService,
        tooth: ToothCode,
        surface: ToothSurface,
        status: OdontogramStatus,
        note: Option<String>,
    ) -> Result<(), AppError> {
        let previous = self.chart.status_of(&tooth, surface);

        let upsert = OdontogramItemUpsert {
            tooth_code: tooth.clone(),
            surface,
            status,
            note: note.clone(),
        };
        self.chart = svc.upsert_odontogram_item(self.patient_id, &upsert).await?;
        info!(tooth = %tooth, %surface, ?status, "chart item saved");

        let event = CreateClinicalEventRequest::odontogram_change(
            self.patient_id,
            tooth,
            surface,
            previous,
            status,
            note,
        );
        match svc.create_clinical_event(&event).await {
            Ok(created) => {
                self.events.insert(0, created);
                Ok(())
            }
            Err(source) => {
                warn!(error = %source, "chart saved but history append failed");
                Err(AppError::ChartUpdatedHistoryPending { event, source })
            }
        }
    }

    /// Retry only the history append of a partial failure, with the
    /// event carried in [`AppError::ChartUpdatedHistoryPending`].
    pub async fn retry_history_append(
        &mut self,
        svc: &impl PatientsService,
        event: CreateClinicalEventRequest,
    ) -> Result<(), AppError> {
        let created = svc.create_clinical_event(&event).await?;
        self.events.insert(0, created);
        Ok(())
    }

    /// Append a free-text NOTE to the history. Blank text is a no-op.
    pub async fn add_note(
        &mut self,
        svc: &impl PatientsService,
        text: &str,
    ) -> Result<(), AppError> {
        let Some(text) = normalize_note(text) else {
            return Ok(());
        };
        let created = svc
            .create_clinical_event(&CreateClinicalEventRequest::note(self.patient_id, text))
            .await?;
        self.events.insert(0, created);
        Ok(())
    }

    fn maybe_suggest_plan_item(
        &mut self,
        tooth: ToothCode,
        surface: ToothSurface,
        status: OdontogramStatus,
        note: Option<String>,
    ) {
        let Some(procedure) = status.suggested_procedure() else {
            return;
        };
        // A live plan item for the exact same work suppresses the offer.
        let already_planned = self.plan.iter().any(|it| {
            it.status != TreatmentStatus::Cancelled
                && it.tooth_code.as_ref() == Some(&tooth)
                && it.surface == Some(surface)
                && it.procedure == procedure
        });
        if already_planned {
            return;
        }
        self.pending = Some(PendingProposal::SuggestPlanItem(PlanSuggestion {
            procedure,
            tooth_code: tooth,
            surface,
            note,
        }));
    }

    /// Confirm a pending plan suggestion. The estimated cost is the one
    /// field the suggestion cannot pre-fill; it is required.
    pub async fn accept_plan_suggestion(
        &mut self,
        svc: &impl PatientsService,
        estimated_cost: &str,
    ) -> Result<&TreatmentPlanItem, AppError> {
        let Some(PendingProposal::SuggestPlanItem(s)) = &self.pending else {
            return Err(AppError::NoSuchProposal);
        };
        let estimated_cost = estimated_cost.trim();
        if estimated_cost.is_empty() {
            // Keep the proposal pending so the form can be corrected.
            return Err(CoreError::MissingEstimatedCost.into());
        }

        let req = CreateTreatmentPlanItemRequest {
            patient_id: self.patient_id,
            procedure: s.procedure,
            status: TreatmentStatus::Planned,
            tooth_code: Some(s.tooth_code.clone()),
            surface: Some(s.surface),
            estimated_cost: estimated_cost.to_string(),
            notes: s.note.clone(),
        };
        let created = svc.create_plan_item(&req).await?;
        self.pending = None;
        self.plan.insert(0, created);
        Ok(&self.plan[0])
    }

    /// Add a plan item by hand. A surface is only meaningful with a
    /// tooth, and the estimated cost is required.
    pub async fn add_plan_item(
        &mut self,
        svc: &impl PatientsService,
        procedure: TreatmentProcedure,
        tooth: Option<ToothCode>,
        surface: Option<ToothSurface>,
        estimated_cost: &str,
        notes: &str,
    ) -> Result<&TreatmentPlanItem, AppError> {
        if surface.is_some() && tooth.is_none() {
            return Err(CoreError::SurfaceWithoutTooth.into());
        }
        let estimated_cost = estimated_cost.trim();
        if estimated_cost.is_empty() {
            return Err(CoreError::MissingEstimatedCost.into());
        }

        let req = CreateTreatmentPlanItemRequest {
            patient_id: self.patient_id,
            procedure,
            status: TreatmentStatus::Planned,
            tooth_code: tooth,
            surface,
            estimated_cost: estimated_cost.to_string(),
            notes: normalize_note(notes),
        };
        let created = svc.create_plan_item(&req).await?;
        self.plan.insert(0, created);
        Ok(&self.plan[0])
    }

    /// Advance a plan item one step (PLANNED → IN_PROGRESS →
    /// COMPLETED). Terminal items are a no-op that issues no request;
    /// returns whether a request was made. The local status flips
    /// optimistically and rolls back if the backend rejects the change.
    ///
    /// Reaching COMPLETED on an item with a tooth and a mapped chart
    /// status raises the apply-to-odontogram proposal.
    pub async fn advance_plan_item(
        &mut self,
        svc: &impl PatientsService,
        item_id: i64,
    ) -> Result<bool, AppError> {
        let Some(idx) = self.plan.iter().position(|it| it.id == item_id) else {
            return Ok(false);
        };
        let current = self.plan[idx].clone();
        let Some(next) = current.status.advance() else {
            return Ok(false);
        };

        self.plan[idx].status = next;
        let updated = match svc.update_plan_status(item_id, next).await {
            Ok(updated) => updated,
            Err(source) => {
                warn!(item_id, ?next, error = %source, "status change rejected, rolling back");
                self.plan[idx] = current;
                return Err(source.into());
            }
        };
        self.plan[idx] = updated.clone();

        if updated.status == TreatmentStatus::Completed
            && let Some(tooth) = updated.tooth_code.clone()
            && let Some(status) = updated.procedure.chart_status()
        {
            let surface =
                effective_surface(status, updated.surface.unwrap_or(ToothSurface::General));
            self.pending = Some(PendingProposal::ApplyToOdontogram {
                item: updated,
                tooth_code: tooth,
                status,
                surface,
            });
        }
        Ok(true)
    }

    /// Confirm reflecting a completed plan item onto the chart. Runs
    /// the same upsert+event flow as [`record_finding`] and then raises
    /// the charge proposal. A partial failure aborts the chain after
    /// the chart write, like any other finding.
    pub async fn accept_apply_to_chart(
        &mut self,
        svc: &impl PatientsService,
    ) -> Result<(), AppError> {
        let Some(PendingProposal::ApplyToOdontogram {
            item,
            tooth_code,
            status,
            surface,
        }) = self.pending.clone()
        else {
            return Err(AppError::NoSuchProposal);
        };
        self.pending = None;

        let note = match item.notes.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => format!("Plan: {n}"),
            _ => format!("Applied from plan ({})", item.procedure),
        };
        self.write_finding(svc, tooth_code.clone(), surface, status, Some(note))
            .await?;

        let mut description = format!("Plan: {}", item.procedure);
        description.push_str(&format!(" · Tooth {tooth_code}"));
        if let Some(s) = item.surface {
            description.push_str(&format!(" · Surf {s}"));
        }
        self.pending = Some(PendingProposal::RegisterCharge(ChargeProposal {
            concept: item.procedure.movement_concept(),
            patient_id: self.patient_id,
            amount: item.charge_amount().to_string(),
            description,
        }));
        Ok(())
    }

    /// Confirm the pending charge, optionally overriding the pre-filled
    /// amount, and record the cash movement.
    pub async fn accept_charge(
        &mut self,
        cash: &impl CashService,
        payment_method: PaymentMethod,
        amount_override: Option<&str>,
    ) -> Result<MoneyMovement, AppError> {
        let Some(PendingProposal::RegisterCharge(p)) = &self.pending else {
            return Err(AppError::NoSuchProposal);
        };
        let amount = amount_override.unwrap_or(&p.amount).trim().to_string();
        if amount.is_empty() {
            return Err(CoreError::MissingAmount.into());
        }

        let req = CreateMoneyMovementRequest {
            concept: p.concept,
            payment_method,
            amount,
            patient_id: Some(p.patient_id),
            appointment_id: None,
            description: Some(p.description.clone()),
        };
        let movement = cash.create_movement(&req).await?;
        info!(movement_id = movement.id, "charge recorded");
        self.pending = None;
        Ok(movement)
    }

    /// Edit the free fields of a plan item. Allowed in any
    /// non-cancelled state and never touches the status.
    pub async fn edit_plan_item(
        &mut self,
        svc: &impl PatientsService,
        item_id: i64,
        final_cost: Option<String>,
        notes: Option<String>,
    ) -> Result<(), AppError> {
        let Some(idx) = self.plan.iter().position(|it| it.id == item_id) else {
            return Err(AppError::NoSuchProposal);
        };
        if !self.plan[idx].is_editable() {
            return Err(AppError::PlanItemCancelled);
        }
        let req = UpdateTreatmentPlanItemRequest { final_cost, notes };
        let updated = svc.update_plan_item(item_id, &req).await?;
        self.plan[idx] = updated;
        Ok(())
    }

    /// Remove exactly one (tooth, surface) entry from the chart.
    pub async fn delete_finding(
        &mut self,
        svc: &impl PatientsService,
        item_id: i64,
    ) -> Result<(), AppError> {
        svc.delete_odontogram_item(self.patient_id, item_id).await?;
        self.chart.items.retain(|it| it.id != item_id);
        Ok(())
    }

    /// Re-fetch the chart, e.g. after an out-of-band change.
    pub async fn refresh_chart(&mut self, svc: &impl PatientsService) -> Result<(), AppError> {
        self.chart = svc.odontogram(self.patient_id).await?;
        Ok(())
    }
}

/// Trim a free-text note; blank collapses to "no note".
pub fn normalize_note(note: &str) -> Option<String> {
    let t = note.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Which patient the UI is looking at. Selecting or clearing bumps the
/// token; a response tagged with an older token must be discarded
/// rather than applied to the wrong patient's screen.
#[derive(Debug, Default)]
pub struct Selection {
    patient: Option<Patient>,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionToken(u64);

impl Selection {
    pub fn select(&mut self, patient: Patient) -> SelectionToken {
        self.generation += 1;
        self.patient = Some(patient);
        SelectionToken(self.generation)
    }

    pub fn clear(&mut self) -> SelectionToken {
        self.generation += 1;
        self.patient = None;
        SelectionToken(self.generation)
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    pub fn token(&self) -> SelectionToken {
        SelectionToken(self.generation)
    }

    pub fn is_current(&self, token: SelectionToken) -> bool {
        token.0 == self.generation
    }
}
