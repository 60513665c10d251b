use crate::error::{Result, WorkflowError};
use crate::types::{effective_status, NewStatus, Operation, Source, Target};
use std::collections::{BTreeMap, HashMap};

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// One entry of an action's status map: tickets in `source` move to `target`
/// when the action runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub source: Source,
    pub target: Target,
}

impl Transition {
    pub fn new(source: Source, target: Target) -> Self {
        Self { source, target }
    }
}

// ---------------------------------------------------------------------------
// ActionRule
// ---------------------------------------------------------------------------

/// A named workflow action: the statuses it applies to, the status it moves
/// the ticket to, and the ticket fields it governs.
///
/// Only constructable through [`ActionRule::new`], which rejects malformed
/// rules once, up front. A specific-status transition always wins over the
/// wildcard entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRule {
    name: String,
    transitions: Vec<Transition>,
    fields: Vec<String>,
    operations: HashMap<String, Operation>,
}

impl ActionRule {
    pub fn new(
        name: impl Into<String>,
        transitions: Vec<Transition>,
        fields: Vec<String>,
        operations: HashMap<String, Operation>,
    ) -> Result<Self> {
        let name = name.into();

        if transitions.is_empty() {
            return Err(WorkflowError::EmptyTransitions(name));
        }
        let wildcards = transitions.iter().filter(|t| t.source.is_any()).count();
        if wildcards > 1 {
            return Err(WorkflowError::MultipleWildcardSources(name));
        }
        for (i, t) in transitions.iter().enumerate() {
            if transitions[..i].iter().any(|prev| prev.source == t.source) {
                return Err(WorkflowError::DuplicateSource {
                    action: name,
                    source_status: t.source.to_string(),
                });
            }
        }
        for (i, f) in fields.iter().enumerate() {
            if fields[..i].contains(f) {
                return Err(WorkflowError::DuplicateField {
                    action: name,
                    field: f.clone(),
                });
            }
        }
        for field in operations.keys() {
            if !fields.contains(field) {
                return Err(WorkflowError::UnknownOperationField {
                    action: name,
                    field: field.clone(),
                });
            }
        }

        Ok(Self {
            name,
            transitions,
            fields,
            operations,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Fields governed by this action, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The operation applied to a governed field. Fields without an explicit
    /// entry are changed, not unset.
    pub fn operation(&self, field: &str) -> Operation {
        self.operations.get(field).copied().unwrap_or_default()
    }

    /// True when this action is available for a ticket in `status`.
    pub fn matches(&self, status: &str) -> bool {
        let status = effective_status(status);
        self.transitions.iter().any(|t| t.source.covers(status))
    }

    /// Resolve the status the ticket moves to when this action runs from
    /// `current_status`. A specific entry wins over the wildcard; a wildcard
    /// target means the status stays as it is.
    ///
    /// Callers select actions with [`crate::table::RuleTable::applicable_actions`]
    /// first, so `MissingTransition` here indicates a caller bug.
    pub fn resolve_new_status(&self, current_status: &str) -> Result<NewStatus> {
        let status = effective_status(current_status);

        let entry = self
            .transitions
            .iter()
            .find(|t| matches!(&t.source, Source::Status(s) if s == status))
            .or_else(|| self.transitions.iter().find(|t| t.source.is_any()));

        let entry = entry.ok_or_else(|| WorkflowError::MissingTransition {
            action: self.name.clone(),
            status: status.to_string(),
        })?;

        Ok(match &entry.target {
            Target::Status(s) => NewStatus::Changed(s.clone()),
            Target::Unchanged => NewStatus::Unchanged,
        })
    }

    /// Compute the ticket changes produced by running this action: one entry
    /// per governed field (`unset` fields become empty, `change` fields take
    /// the submitted value), plus a `status` entry when the transition moves
    /// the ticket to a concrete new status.
    pub fn field_changes(
        &self,
        current_status: &str,
        submitted: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>> {
        let mut updated = BTreeMap::new();

        if let NewStatus::Changed(status) = self.resolve_new_status(current_status)? {
            updated.insert("status".to_string(), status);
        }

        for field in &self.fields {
            let value = match self.operation(field) {
                Operation::Unset => String::new(),
                Operation::Change => submitted.get(field).cloned().unwrap_or_default(),
            };
            updated.insert(field.clone(), value);
        }

        Ok(updated)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
