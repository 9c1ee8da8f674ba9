use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaffingError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Demand predictor failed: {0:#}")]
    Predictor(anyhow::Error),

    #[error("Duplicate staff_id in roster: {staff_id}")]
    DuplicateStaffId { staff_id: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StaffingError {
    /// True for errors the caller can fix by correcting the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StaffingError::MissingField { .. } | StaffingError::InvalidRequest(_)
        )
    }
}

pub type StaffingResult<T> = Result<T, StaffingError>;
