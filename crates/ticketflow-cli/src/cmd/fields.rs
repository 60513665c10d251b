use crate::output::print_json;
use ticketflow_core::RuleTable;

pub fn run(table: &RuleTable, status: &str, json: bool) -> anyhow::Result<()> {
    let fields: Vec<&str> = table.governed_fields(status).into_iter().collect();

    if json {
        return print_json(&fields);
    }
    for field in fields {
        println!("{field}");
    }
    Ok(())
}
