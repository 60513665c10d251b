use crate::output::{print_json, print_table};
use serde::Serialize;
use ticketflow_core::types::NewStatus;
use ticketflow_core::RuleTable;

#[derive(Serialize)]
struct ActionRow<'a> {
    weight: usize,
    action: &'a str,
    next_status: Option<&'a str>,
    fields: &'a [String],
}

pub fn run(table: &RuleTable, status: &str, json: bool) -> anyhow::Result<()> {
    let mut rows = Vec::new();
    for (weight, name) in table.applicable_actions(status) {
        let rule = table.get(name)?;
        let next = rule.resolve_new_status(status)?;
        rows.push((weight, rule, next));
    }

    if json {
        let out: Vec<ActionRow> = rows
            .iter()
            .map(|(weight, rule, next)| ActionRow {
                weight: *weight,
                action: rule.name(),
                next_status: next.changed(),
                fields: rule.fields(),
            })
            .collect();
        return print_json(&out);
    }

    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|(weight, rule, next)| {
            vec![
                weight.to_string(),
                rule.name().to_string(),
                match next {
                    NewStatus::Changed(s) => s.clone(),
                    NewStatus::Unchanged => "(unchanged)".to_string(),
                },
                rule.fields().join(", "),
            ]
        })
        .collect();
    print_table(&["WEIGHT", "ACTION", "NEXT STATUS", "FIELDS"], &rendered);
    Ok(())
}
