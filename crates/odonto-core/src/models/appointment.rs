use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Terminal from the client's point of view: once COMPLETED or
    /// CANCELLED, no further status change may be requested.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    /// Counts toward the calendar's "pending" tally.
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }
}

/// A booked appointment. Start/end times are naive local date-time
/// strings (`YYYY-MM-DDTHH:mm:ss`, no zone) treated as opaque wall-clock
/// values; the client never converts them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Server-computed: the appointment was booked after its start time.
    #[serde(default)]
    pub created_late: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateAppointmentRequest {
    pub patient_id: i64,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}
