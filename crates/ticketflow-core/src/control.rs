use crate::error::Result;
use crate::rule::ActionRule;
use crate::types::{NewStatus, Operation};
use serde::Serialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// ActionControl
// ---------------------------------------------------------------------------

/// One editable input in an action's control: the governed field and the
/// value to pre-fill it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInput {
    pub field: String,
    pub value: String,
}

/// Framework-neutral description of an action's submission control: the
/// inputs to render and the hint text to show next to the action. How these
/// become markup is the embedding application's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionControl {
    pub action: String,
    pub inputs: Vec<FieldInput>,
    pub hints: Vec<String>,
}

impl ActionControl {
    pub fn hint_text(&self) -> String {
        if self.hints.is_empty() {
            String::new()
        } else {
            format!("{}.", self.hints.join(". "))
        }
    }
}

/// Describe the control for `rule` on a ticket in `current_status` with the
/// given current field values. `change` fields become inputs pre-filled from
/// `current_values`; `unset` fields become a hint instead of an input; a
/// concrete status transition adds a "Next status" hint.
pub fn describe_action(
    rule: &ActionRule,
    current_status: &str,
    current_values: &BTreeMap<String, String>,
) -> Result<ActionControl> {
    let mut inputs = Vec::new();
    let mut hints = Vec::new();

    for field in rule.fields() {
        match rule.operation(field) {
            Operation::Unset => hints.push(format!("{field} will be unset")),
            Operation::Change => inputs.push(FieldInput {
                field: field.clone(),
                value: current_values.get(field).cloned().unwrap_or_default(),
            }),
        }
    }

    if let NewStatus::Changed(status) = rule.resolve_new_status(current_status)? {
        hints.push(format!("Next status will be {status}"));
    }

    Ok(ActionControl {
        action: rule.name().to_string(),
        inputs,
        hints,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RuleTable;

    #[test]
    fn accept_control_prefills_owner() {
        let table = RuleTable::default();
        let values = BTreeMap::from([("owner".to_string(), "alice".to_string())]);
        let control = describe_action(table.get("accept").unwrap(), "new", &values).unwrap();

        assert_eq!(control.inputs.len(), 1);
        assert_eq!(control.inputs[0].field, "owner");
        assert_eq!(control.inputs[0].value, "alice");
        assert_eq!(control.hints, vec!["Next status will be accepted"]);
    }

    #[test]
    fn reopen_control_hints_unset() {
        let table = RuleTable::default();
        let control =
            describe_action(table.get("reopen").unwrap(), "closed", &BTreeMap::new()).unwrap();

        assert!(control.inputs.is_empty());
        assert_eq!(
            control.hints,
            vec!["resolution will be unset", "Next status will be reopened"]
        );
        assert_eq!(
            control.hint_text(),
            "resolution will be unset. Next status will be reopened."
        );
    }

    #[test]
    fn retarget_control_has_no_status_hint() {
        let table = RuleTable::default();
        let control =
            describe_action(table.get("retarget").unwrap(), "new", &BTreeMap::new()).unwrap();

        assert_eq!(control.inputs.len(), 1);
        assert_eq!(control.inputs[0].field, "milestone");
        assert!(control.hints.is_empty());
        assert_eq!(control.hint_text(), "");
    }

    #[test]
    fn leave_control_is_empty() {
        let table = RuleTable::default();
        let control =
            describe_action(table.get("leave").unwrap(), "assigned", &BTreeMap::new()).unwrap();
        assert!(control.inputs.is_empty());
        assert!(control.hints.is_empty());
    }

    #[test]
    fn control_json_shape() {
        let table = RuleTable::default();
        let control =
            describe_action(table.get("reopen").unwrap(), "closed", &BTreeMap::new()).unwrap();
        let json = serde_json::to_string(&control).unwrap();
        assert!(json.contains("\"action\":\"reopen\""));
        assert!(json.contains("resolution will be unset"));
    }

    #[test]
    fn missing_value_prefills_empty() {
        let table = RuleTable::default();
        let control =
            describe_action(table.get("accept").unwrap(), "new", &BTreeMap::new()).unwrap();
        assert_eq!(control.inputs[0].value, "");
    }
}
