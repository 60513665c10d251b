use crate::output::print_json;
use std::collections::BTreeMap;
use ticketflow_core::control::describe_action;
use ticketflow_core::RuleTable;

pub fn run(
    table: &RuleTable,
    action: &str,
    status: &str,
    values: &BTreeMap<String, String>,
    json: bool,
) -> anyhow::Result<()> {
    let rule = table.get(action)?;
    let control = describe_action(rule, status, values)?;

    if json {
        return print_json(&control);
    }

    println!("{}", control.action);
    for input in &control.inputs {
        if input.value.is_empty() {
            println!("  input: {}", input.field);
        } else {
            println!("  input: {} (current: {})", input.field, input.value);
        }
    }
    if !control.hints.is_empty() {
        println!("  {}", control.hint_text());
    }
    Ok(())
}
