use crate::table::RuleTable;
use std::collections::BTreeSet;

/// The seam between the rule engine and whatever renders a ticket page.
///
/// A rendering layer needs exactly two answers: which actions to offer for a
/// ticket's current status, and which fields those actions govern (so the
/// generic property display can skip them). Consumers depend on this trait
/// rather than on [`RuleTable`] directly.
pub trait WorkflowQuery {
    /// Applicable action names with their positional weights, in table order.
    fn actions_for(&self, current_status: &str) -> Vec<(usize, &str)>;

    /// Fields governed by at least one applicable action.
    fn fields_for(&self, current_status: &str) -> BTreeSet<&str>;
}

impl WorkflowQuery for RuleTable {
    fn actions_for(&self, current_status: &str) -> Vec<(usize, &str)> {
        self.applicable_actions(current_status)
    }

    fn fields_for(&self, current_status: &str) -> BTreeSet<&str> {
        self.governed_fields(current_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden_fields<Q: WorkflowQuery>(query: &Q, status: &str) -> Vec<String> {
        query
            .fields_for(status)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn trait_object_answers_both_queries() {
        let table = RuleTable::default();
        let query: &dyn WorkflowQuery = &table;
        assert!(!query.actions_for("new").is_empty());
        assert!(query.fields_for("new").contains("owner"));
    }

    #[test]
    fn generic_consumer_sees_table_answers() {
        let table = RuleTable::default();
        let hidden = hidden_fields(&table, "closed");
        // Only reopen and escalate govern fields when closed.
        assert_eq!(hidden, vec!["owner", "priority", "resolution"]);
    }
}
