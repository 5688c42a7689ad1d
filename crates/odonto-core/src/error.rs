use thiserror::Error;

use crate::models::odontogram::OdontogramStatus;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid FDI tooth code: {0}")]
    InvalidToothCode(String),

    #[error("surface must be GENERAL for status {status:?}")]
    SurfaceRequiresGeneral { status: OdontogramStatus },

    #[error("a surface requires a tooth code")]
    SurfaceWithoutTooth,

    #[error("estimated cost is required")]
    MissingEstimatedCost,

    #[error("amount is required")]
    MissingAmount,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
