use thiserror::Error;

use odonto_client::ApiError;
use odonto_core::error::CoreError;
use odonto_core::models::clinical_event::CreateClinicalEventRequest;

#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected before any network call.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// A remote call failed; no local state was left half-applied.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Partial failure: the odontogram write succeeded but the history
    /// append did not. The chart is ahead of its log; `event` is the
    /// entry that still needs appending so the caller can retry just
    /// that step.
    #[error("chart updated, but the history entry is missing: {source}")]
    ChartUpdatedHistoryPending {
        event: CreateClinicalEventRequest,
        source: ApiError,
    },

    #[error("no such proposal is pending")]
    NoSuchProposal,

    #[error("cancelled plan items cannot be edited")]
    PlanItemCancelled,
}

impl AppError {
    /// True for the partial-failure case a UI must word differently
    /// from a total failure.
    pub fn is_partial(&self) -> bool {
        matches!(self, AppError::ChartUpdatedHistoryPending { .. })
    }
}
