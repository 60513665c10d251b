use crate::output::{print_json, print_table};
use std::collections::BTreeMap;
use ticketflow_core::RuleTable;

pub fn run(
    table: &RuleTable,
    action: &str,
    status: &str,
    submitted: &BTreeMap<String, String>,
    json: bool,
) -> anyhow::Result<()> {
    let rule = table.get(action)?;
    let changes = rule.field_changes(status, submitted)?;

    if json {
        return print_json(&changes);
    }

    let rows: Vec<Vec<String>> = changes
        .iter()
        .map(|(field, value)| vec![field.clone(), value.clone()])
        .collect();
    print_table(&["FIELD", "NEW VALUE"], &rows);
    Ok(())
}
