use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("duplicate action: {0}")]
    DuplicateAction(String),

    #[error("action '{action}' sets an operation for '{field}', which is not in its fields")]
    UnknownOperationField { action: String, field: String },

    #[error("action '{0}' declares more than one wildcard source status")]
    MultipleWildcardSources(String),

    #[error("action '{0}' has no status transitions")]
    EmptyTransitions(String),

    #[error("action '{action}' lists source status '{source_status}' twice")]
    DuplicateSource { action: String, source_status: String },

    #[error("action '{action}' lists field '{field}' twice")]
    DuplicateField { action: String, field: String },

    #[error("action '{action}' has no transition for status '{status}' and no wildcard")]
    MissingTransition { action: String, status: String },

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("invalid field operation '{0}': expected 'change' or 'unset'")]
    InvalidOperation(String),

    #[error("invalid transition '{0}': expected 'status1,status2 -> newstatus'")]
    InvalidTransition(String),

    #[error("invalid status '{0}': must be non-empty")]
    InvalidStatus(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
