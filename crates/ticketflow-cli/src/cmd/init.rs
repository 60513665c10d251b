use anyhow::bail;
use std::path::Path;
use ticketflow_core::config::WorkflowConfig;
use ticketflow_core::io::write_if_missing;

pub fn run(path: &Path) -> anyhow::Result<()> {
    let cfg = WorkflowConfig::default();
    let data = serde_yaml::to_string(&cfg)?;

    if !write_if_missing(path, data.as_bytes())? {
        bail!("{} already exists", path.display());
    }
    println!("wrote {}", path.display());
    Ok(())
}
