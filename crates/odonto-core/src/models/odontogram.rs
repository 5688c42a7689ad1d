use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::tooth::{ToothCode, ToothSurface};
use super::treatment_plan::TreatmentProcedure;

/// Recorded status of a tooth or tooth surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum OdontogramStatus {
    Healthy,
    Caries,
    Filling,
    Crown,
    Endodontic,
    Implant,
    Missing,
    Extracted,
}

impl OdontogramStatus {
    /// Severity weight used by the chart aggregator. Higher wins.
    pub fn severity(self) -> u8 {
        match self {
            OdontogramStatus::Healthy => 0,
            OdontogramStatus::Crown => 1,
            OdontogramStatus::Filling => 2,
            OdontogramStatus::Endodontic => 3,
            OdontogramStatus::Caries => 4,
            OdontogramStatus::Implant => 5,
            OdontogramStatus::Missing => 6,
            OdontogramStatus::Extracted => 7,
        }
    }

    /// Whole-tooth-only statuses: recording these on a positional surface
    /// is invalid; the surface must be GENERAL.
    pub fn requires_general(self) -> bool {
        matches!(
            self,
            OdontogramStatus::Implant | OdontogramStatus::Missing | OdontogramStatus::Extracted
        )
    }

    /// Procedure the clinic would typically plan after recording this
    /// status, if any. Drives the chart → plan suggestion.
    pub fn suggested_procedure(self) -> Option<TreatmentProcedure> {
        match self {
            OdontogramStatus::Caries => Some(TreatmentProcedure::Filling),
            OdontogramStatus::Endodontic => Some(TreatmentProcedure::RootCanal),
            OdontogramStatus::Extracted => Some(TreatmentProcedure::Extraction),
            OdontogramStatus::Missing => Some(TreatmentProcedure::Implant),
            OdontogramStatus::Crown => Some(TreatmentProcedure::Crown),
            _ => None,
        }
    }
}

/// One entry of a patient's chart. At most one item exists per
/// (tooth, surface) pair; an upsert overwrites in place.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OdontogramItem {
    pub id: i64,
    pub tooth_code: ToothCode,
    pub surface: ToothSurface,
    pub status: OdontogramStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// A patient's full dental chart as returned by the patients service.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Odontogram {
    pub odontogram_id: i64,
    pub patient_id: i64,
    pub items: Vec<OdontogramItem>,
}

impl Odontogram {
    /// Look up the item recorded for a (tooth, surface) pair.
    pub fn item(&self, tooth: &ToothCode, surface: ToothSurface) -> Option<&OdontogramItem> {
        self.items
            .iter()
            .find(|it| it.tooth_code == *tooth && it.surface == surface)
    }

    /// Status recorded for a (tooth, surface) pair, HEALTHY if none.
    pub fn status_of(&self, tooth: &ToothCode, surface: ToothSurface) -> OdontogramStatus {
        self.item(tooth, surface)
            .map(|it| it.status)
            .unwrap_or(OdontogramStatus::Healthy)
    }
}

/// Body of the odontogram item upsert (PUT). The server resolves the
/// (tooth, surface) key: it overwrites an existing item or creates one.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OdontogramItemUpsert {
    pub tooth_code: ToothCode,
    pub surface: ToothSurface,
    pub status: OdontogramStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
}
