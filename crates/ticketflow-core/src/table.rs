use crate::error::{Result, WorkflowError};
use crate::rule::{ActionRule, Transition};
use crate::types::{effective_status, Operation, Source, Target};
use std::collections::{BTreeSet, HashMap};

// ---------------------------------------------------------------------------
// RuleTable
// ---------------------------------------------------------------------------

/// The full workflow configuration: every action rule, in declaration order.
///
/// Order matters — [`RuleTable::applicable_actions`] reports a positional
/// weight that consumers use to order action controls. The table is
/// read-only once built; an embedding application that reloads configuration
/// must swap the whole table atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<ActionRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<ActionRule>) -> Result<Self> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|prev| prev.name() == rule.name()) {
                return Err(WorkflowError::DuplicateAction(rule.name().to_string()));
            }
        }
        Ok(Self { rules })
    }

    pub fn get(&self, name: &str) -> Result<&ActionRule> {
        self.rules
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| WorkflowError::UnknownAction(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Actions available for a ticket in `current_status`, in table order,
    /// each paired with its zero-based positional weight. An empty status
    /// evaluates as `new`.
    pub fn applicable_actions(&self, current_status: &str) -> Vec<(usize, &str)> {
        let status = effective_status(current_status);
        self.rules
            .iter()
            .filter(|r| r.matches(status))
            .map(|r| r.name())
            .enumerate()
            .collect()
    }

    /// The union of fields governed by the actions applicable in
    /// `current_status`. These are the fields a consumer hides from the
    /// generic property display because an action control will edit them.
    pub fn governed_fields(&self, current_status: &str) -> BTreeSet<&str> {
        let status = effective_status(current_status);
        self.rules
            .iter()
            .filter(|r| r.matches(status))
            .flat_map(|r| r.fields().iter().map(String::as_str))
            .collect()
    }

    /// Every status named by the table, source or target side, excluding
    /// wildcards and the empty string.
    pub fn all_statuses(&self) -> BTreeSet<String> {
        let mut statuses = BTreeSet::new();
        for rule in &self.rules {
            for t in rule.transitions() {
                if let Source::Status(s) = &t.source {
                    statuses.insert(s.clone());
                }
                if let Target::Status(s) = &t.target {
                    statuses.insert(s.clone());
                }
            }
        }
        statuses.remove("");
        statuses
    }
}

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

fn builtin_rule(
    name: &str,
    transitions: &[(&str, &str)],
    fields: &[&str],
    operations: &[(&str, Operation)],
) -> ActionRule {
    let transitions = transitions
        .iter()
        .map(|(src, dst)| {
            Transition::new(
                src.parse().expect("builtin source"),
                dst.parse().expect("builtin target"),
            )
        })
        .collect();
    let fields = fields.iter().map(|f| f.to_string()).collect();
    let operations: HashMap<String, Operation> = operations
        .iter()
        .map(|(f, op)| (f.to_string(), *op))
        .collect();
    ActionRule::new(name, transitions, fields, operations).expect("builtin rule")
}

impl Default for RuleTable {
    /// The stock ticket workflow: `leave` applies everywhere and touches
    /// nothing; the rest mirror the classic open/assigned/closed lifecycle.
    fn default() -> Self {
        let rules = vec![
            builtin_rule("leave", &[("*", "*")], &[], &[]),
            builtin_rule(
                "accept",
                &[
                    ("new", "accepted"),
                    ("assigned", "accepted"),
                    ("accepted", "accepted"),
                    ("reopened", "accepted"),
                ],
                &["owner"],
                &[],
            ),
            builtin_rule(
                "resolve",
                &[
                    ("new", "closed"),
                    ("assigned", "closed"),
                    ("accepted", "closed"),
                    ("reopened", "closed"),
                ],
                &["resolution"],
                &[],
            ),
            builtin_rule(
                "reassign",
                &[
                    ("new", "assigned"),
                    ("assigned", "assigned"),
                    ("accepted", "assigned"),
                    ("reopened", "assigned"),
                ],
                &["owner"],
                &[],
            ),
            builtin_rule(
                "reopen",
                &[("closed", "reopened")],
                &["resolution"],
                &[("resolution", Operation::Unset)],
            ),
            builtin_rule(
                "retarget",
                &[
                    ("new", "*"),
                    ("assigned", "*"),
                    ("accepted", "*"),
                    ("reopened", "*"),
                ],
                &["milestone"],
                &[],
            ),
            builtin_rule(
                "escalate",
                &[("*", "assigned")],
                &["owner", "priority", "resolution"],
                &[("resolution", Operation::Unset)],
            ),
        ];
        RuleTable::new(rules).expect("builtin table")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
