use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::cash::MovementConcept;
use super::odontogram::OdontogramStatus;
use super::tooth::{ToothCode, ToothSurface};

/// Clinical procedures the clinic plans and bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TreatmentProcedure {
    Consultation,
    Cleaning,
    Filling,
    RootCanal,
    Crown,
    Extraction,
    Implant,
    Orthodontics,
    Prosthesis,
    Whitening,
    ControlVisit,
    Other,
}

impl TreatmentProcedure {
    /// Wire form of the procedure, as the services spell it.
    pub fn code(self) -> &'static str {
        match self {
            TreatmentProcedure::Consultation => "CONSULTATION",
            TreatmentProcedure::Cleaning => "CLEANING",
            TreatmentProcedure::Filling => "FILLING",
            TreatmentProcedure::RootCanal => "ROOT_CANAL",
            TreatmentProcedure::Crown => "CROWN",
            TreatmentProcedure::Extraction => "EXTRACTION",
            TreatmentProcedure::Implant => "IMPLANT",
            TreatmentProcedure::Orthodontics => "ORTHODONTICS",
            TreatmentProcedure::Prosthesis => "PROSTHESIS",
            TreatmentProcedure::Whitening => "WHITENING",
            TreatmentProcedure::ControlVisit => "CONTROL_VISIT",
            TreatmentProcedure::Other => "OTHER",
        }
    }

    /// Chart status a completed procedure reflects onto the odontogram,
    /// if any. Drives the plan → chart proposal.
    pub fn chart_status(self) -> Option<OdontogramStatus> {
        match self {
            TreatmentProcedure::Filling => Some(OdontogramStatus::Filling),
            TreatmentProcedure::RootCanal => Some(OdontogramStatus::Endodontic),
            TreatmentProcedure::Crown => Some(OdontogramStatus::Crown),
            TreatmentProcedure::Extraction => Some(OdontogramStatus::Extracted),
            TreatmentProcedure::Implant => Some(OdontogramStatus::Implant),
            _ => None,
        }
    }

    /// Cash concept used when charging for this procedure. Only the
    /// seven mapped procedures have a dedicated concept; everything
    /// else, CONSULTATION and PROSTHESIS included, falls back to
    /// OTHER_INCOME.
    pub fn movement_concept(self) -> MovementConcept {
        match self {
            TreatmentProcedure::Cleaning => MovementConcept::Cleaning,
            TreatmentProcedure::Filling => MovementConcept::Filling,
            TreatmentProcedure::RootCanal => MovementConcept::RootCanal,
            TreatmentProcedure::Extraction => MovementConcept::Extraction,
            TreatmentProcedure::Orthodontics => MovementConcept::Orthodontics,
            TreatmentProcedure::Whitening => MovementConcept::Whitening,
            TreatmentProcedure::ControlVisit => MovementConcept::ControlVisit,
            _ => MovementConcept::OtherIncome,
        }
    }
}

impl std::fmt::Display for TreatmentProcedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Plan item lifecycle. Forward-only, with CANCELLED as the escape
/// hatch from the two non-terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TreatmentStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl TreatmentStatus {
    /// Next status on the forward path, or `None` from a terminal state.
    pub fn advance(self) -> Option<TreatmentStatus> {
        match self {
            TreatmentStatus::Planned => Some(TreatmentStatus::InProgress),
            TreatmentStatus::InProgress => Some(TreatmentStatus::Completed),
            TreatmentStatus::Completed | TreatmentStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TreatmentStatus::Completed | TreatmentStatus::Cancelled)
    }

    /// Whether CANCELLED is reachable from this state.
    pub fn can_cancel(self) -> bool {
        matches!(self, TreatmentStatus::Planned | TreatmentStatus::InProgress)
    }
}

/// A planned or completed procedure tracked against a patient. Costs
/// travel as decimal strings; a surface is only meaningful with a tooth.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TreatmentPlanItem {
    pub id: i64,
    pub patient_id: i64,
    pub procedure: TreatmentProcedure,
    pub status: TreatmentStatus,
    #[serde(default)]
    pub tooth_code: Option<ToothCode>,
    #[serde(default)]
    pub surface: Option<ToothSurface>,
    pub estimated_cost: String,
    #[serde(default)]
    pub final_cost: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TreatmentPlanItem {
    /// finalCost/notes are editable in any non-cancelled state.
    pub fn is_editable(&self) -> bool {
        self.status != TreatmentStatus::Cancelled
    }

    /// Amount pre-filled when charging for this item: final cost when
    /// set, estimated cost otherwise.
    pub fn charge_amount(&self) -> &str {
        self.final_cost.as_deref().unwrap_or(&self.estimated_cost)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateTreatmentPlanItemRequest {
    pub patient_id: i64,
    pub procedure: TreatmentProcedure,
    pub status: TreatmentStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tooth_code: Option<ToothCode>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub surface: Option<ToothSurface>,
    pub estimated_cost: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

/// Partial update of the editable fields (finalCost/notes).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateTreatmentPlanItemRequest {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub final_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}
