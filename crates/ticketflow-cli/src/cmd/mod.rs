pub mod actions;
pub mod apply;
pub mod fields;
pub mod init;
pub mod show;
pub mod statuses;
pub mod validate;

use anyhow::{bail, Context};
use std::collections::BTreeMap;
use std::path::Path;
use ticketflow_core::config::WorkflowConfig;
use ticketflow_core::RuleTable;

/// Load the rule table: from a config file when one is given, otherwise the
/// built-in default workflow.
pub fn load_table(config: Option<&Path>) -> anyhow::Result<RuleTable> {
    match config {
        Some(path) => {
            let cfg = WorkflowConfig::load(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let table = cfg
                .build()
                .with_context(|| format!("building rule table from {}", path.display()))?;
            tracing::debug!(path = %path.display(), actions = table.len(), "loaded workflow config");
            Ok(table)
        }
        None => Ok(RuleTable::default()),
    }
}

/// Parse repeated `--value field=value` arguments.
pub fn parse_values(pairs: &[String]) -> anyhow::Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    for pair in pairs {
        let Some((field, value)) = pair.split_once('=') else {
            bail!("invalid value '{pair}': expected field=value");
        };
        let field = field.trim();
        if field.is_empty() {
            bail!("invalid value '{pair}': empty field name");
        }
        values.insert(field.to_string(), value.to_string());
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_values_splits_on_first_equals() {
        let values = parse_values(&["owner=alice".to_string(), "note=a=b".to_string()]).unwrap();
        assert_eq!(values["owner"], "alice");
        assert_eq!(values["note"], "a=b");
    }

    #[test]
    fn parse_values_rejects_missing_equals() {
        assert!(parse_values(&["owner".to_string()]).is_err());
    }

    #[test]
    fn parse_values_rejects_empty_field() {
        assert!(parse_values(&["=alice".to_string()]).is_err());
    }

    #[test]
    fn load_table_without_config_is_default() {
        let table = load_table(None).unwrap();
        assert_eq!(table, RuleTable::default());
    }
}
