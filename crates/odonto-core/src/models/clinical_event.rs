use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::odontogram::OdontogramStatus;
use super::tooth::{ToothCode, ToothSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ClinicalEventKind {
    Note,
    OdontogramChange,
}

/// An immutable entry of the patient's clinical history. Appended once,
/// never edited; the service returns them newest first.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClinicalEvent {
    pub id: i64,
    pub patient_id: i64,
    #[serde(rename = "type")]
    pub kind: ClinicalEventKind,
    #[serde(default)]
    pub tooth_code: Option<ToothCode>,
    #[serde(default)]
    pub surface: Option<ToothSurface>,
    #[serde(default)]
    pub from_status: Option<OdontogramStatus>,
    #[serde(default)]
    pub to_status: Option<OdontogramStatus>,
    #[serde(default)]
    pub note: Option<String>,
    /// Server-stamped creation instant, kept as the service sent it.
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateClinicalEventRequest {
    pub patient_id: i64,
    #[serde(rename = "type")]
    pub kind: ClinicalEventKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tooth_code: Option<ToothCode>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub surface: Option<ToothSurface>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub from_status: Option<OdontogramStatus>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to_status: Option<OdontogramStatus>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
}

impl CreateClinicalEventRequest {
    /// Build the ODONTOGRAM_CHANGE entry that records one chart upsert.
    pub fn odontogram_change(
        patient_id: i64,
        tooth_code: ToothCode,
        surface: ToothSurface,
        from_status: OdontogramStatus,
        to_status: OdontogramStatus,
        note: Option<String>,
    ) -> Self {
        Self {
            patient_id,
            kind: ClinicalEventKind::OdontogramChange,
            tooth_code: Some(tooth_code),
            surface: Some(surface),
            from_status: Some(from_status),
            to_status: Some(to_status),
            note,
        }
    }

    /// Build a free-text NOTE entry.
    pub fn note(patient_id: i64, text: String) -> Self {
        Self {
            patient_id,
            kind: ClinicalEventKind::Note,
            tooth_code: None,
            surface: None,
            from_status: None,
            to_status: None,
            note: Some(text),
        }
    }
}
