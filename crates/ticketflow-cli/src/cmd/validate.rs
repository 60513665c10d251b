use crate::output::print_json;
use anyhow::{bail, Context};
use std::path::Path;
use ticketflow_core::config::{WarnLevel, WorkflowConfig};

pub fn run(config: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let cfg = match config {
        Some(path) => {
            WorkflowConfig::load(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => WorkflowConfig::default(),
    };

    let warnings = cfg.validate();

    if json {
        print_json(&warnings)?;
    } else if warnings.is_empty() {
        println!("ok: {} action(s), no findings", cfg.actions.len());
    } else {
        for w in &warnings {
            let level = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("{level}: {}", w.message);
        }
    }

    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();
    if errors > 0 {
        bail!("{errors} error(s) found");
    }
    Ok(())
}
