use crate::output::print_json;
use ticketflow_core::RuleTable;

pub fn run(table: &RuleTable, json: bool) -> anyhow::Result<()> {
    let statuses = table.all_statuses();

    if json {
        return print_json(&statuses);
    }
    for status in statuses {
        println!("{status}");
    }
    Ok(())
}
