//! Advisory proposals: system-suggested next actions that take effect
//! only after explicit confirmation. At most one proposal is pending at
//! a time; declining any link in the chain abandons the rest.

use serde::Serialize;

use odonto_core::models::cash::MovementConcept;
use odonto_core::models::odontogram::OdontogramStatus;
use odonto_core::models::tooth::{ToothCode, ToothSurface};
use odonto_core::models::treatment_plan::{TreatmentPlanItem, TreatmentProcedure};

/// Chart → plan: a freshly recorded finding suggests a procedure.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSuggestion {
    pub procedure: TreatmentProcedure,
    pub tooth_code: ToothCode,
    pub surface: ToothSurface,
    /// Note entered with the finding, carried into the plan item.
    pub note: Option<String>,
}

/// Plan → cash: a completed procedure can be charged.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeProposal {
    pub concept: MovementConcept,
    pub patient_id: i64,
    /// Pre-filled from the item's final (or estimated) cost.
    pub amount: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub enum PendingProposal {
    /// Offer to add a plan item for a just-recorded finding.
    SuggestPlanItem(PlanSuggestion),
    /// Offer to reflect a completed plan item onto the chart.
    ApplyToOdontogram {
        item: TreatmentPlanItem,
        tooth_code: ToothCode,
        status: OdontogramStatus,
        /// Already coerced to GENERAL for whole-tooth statuses.
        surface: ToothSurface,
    },
    /// Offer to record the income for a completed procedure.
    RegisterCharge(ChargeProposal),
}
