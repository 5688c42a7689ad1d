use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Insurance plan; the services spell the field "obraSocial".
    #[serde(rename = "obraSocial", default)]
    pub insurance_name: Option<String>,
    #[serde(rename = "obraSocialNumber", default)]
    pub insurance_number: Option<String>,
    pub active: bool,
}

impl Patient {
    /// One-line label used in pickers: "Last, First · DNI 123 (#id)".
    pub fn label(&self) -> String {
        format!(
            "{}, {} · DNI {} (#{})",
            self.last_name, self.first_name, self.document_number, self.id
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatePatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address: Option<String>,
    #[serde(rename = "obraSocial", skip_serializing_if = "Option::is_none", default)]
    pub insurance_name: Option<String>,
    #[serde(
        rename = "obraSocialNumber",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub insurance_number: Option<String>,
}

/// Pre-fill a new-patient form from a search query that found nothing:
/// all digits reads as a document number, two or more words as
/// "last first…", a single word as a last name.
pub fn guess_patient_from_query(query: &str) -> CreatePatientRequest {
    let t = query.trim();
    let mut req = CreatePatientRequest::default();
    if t.is_empty() {
        return req;
    }
    if t.chars().all(|c| c.is_ascii_digit()) {
        req.document_number = t.to_string();
        return req;
    }
    let parts: Vec<&str> = t.split_whitespace().collect();
    if parts.len() >= 2 {
        req.last_name = parts[0].to_string();
        req.first_name = parts[1..].join(" ");
    } else {
        req.last_name = t.to_string();
    }
    req
}
