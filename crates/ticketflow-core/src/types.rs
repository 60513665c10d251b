use serde::{Deserialize, Serialize};
use std::fmt;

/// Status assumed when a ticket has no status yet (empty or absent).
pub const DEFAULT_STATUS: &str = "new";

/// Wildcard token in the textual transition encoding.
pub const WILDCARD: &str = "*";

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// The field takes the value submitted with the action.
    #[default]
    Change,
    /// The field is cleared when the action is applied.
    Unset,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Change => "change",
            Operation::Unset => "unset",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Operation {
    type Err = crate::error::WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "change" => Ok(Operation::Change),
            "unset" => Ok(Operation::Unset),
            _ => Err(crate::error::WorkflowError::InvalidOperation(
                s.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Left-hand side of a transition entry: a specific status, or any status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    Status(String),
    Any,
}

impl Source {
    pub fn is_any(&self) -> bool {
        matches!(self, Source::Any)
    }

    /// True when this source covers the given current status.
    pub fn covers(&self, status: &str) -> bool {
        match self {
            Source::Status(s) => s == status,
            Source::Any => true,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Status(s) => f.write_str(s),
            Source::Any => f.write_str(WILDCARD),
        }
    }
}

impl std::str::FromStr for Source {
    type Err = crate::error::WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            WILDCARD => Ok(Source::Any),
            "" => Err(crate::error::WorkflowError::InvalidStatus(s.to_string())),
            _ => Ok(Source::Status(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// Right-hand side of a transition entry: the status the ticket moves to,
/// or `Unchanged` (written `*`) meaning the ticket keeps its current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Status(String),
    Unchanged,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Status(s) => f.write_str(s),
            Target::Unchanged => f.write_str(WILDCARD),
        }
    }
}

impl std::str::FromStr for Target {
    type Err = crate::error::WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            WILDCARD => Ok(Target::Unchanged),
            "" => Err(crate::error::WorkflowError::InvalidStatus(s.to_string())),
            _ => Ok(Target::Status(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// NewStatus
// ---------------------------------------------------------------------------

/// Outcome of resolving an action against a current status. Never carries
/// the wildcard token; `Unchanged` means the caller must not touch the
/// ticket's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewStatus {
    Changed(String),
    Unchanged,
}

impl NewStatus {
    pub fn changed(&self) -> Option<&str> {
        match self {
            NewStatus::Changed(s) => Some(s),
            NewStatus::Unchanged => None,
        }
    }
}

/// Normalize a ticket's current status: an empty string evaluates as
/// [`DEFAULT_STATUS`].
pub fn effective_status(status: &str) -> &str {
    if status.is_empty() {
        DEFAULT_STATUS
    } else {
        status
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
