use crate::error::{Result, WorkflowError};
use crate::rule::{ActionRule, Transition};
use crate::table::RuleTable;
use crate::types::Operation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ActionSpec
// ---------------------------------------------------------------------------

/// One action as written in the config file. The transition map uses the
/// arrow encoding `status1,status2 -> newstatus`; `*` on the left matches
/// any status, `*` on the right leaves the status unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionSpec {
    pub name: String,
    pub transitions: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub operations: BTreeMap<String, Operation>,
}

impl ActionSpec {
    fn build(&self) -> Result<ActionRule> {
        let transitions = parse_transitions(&self.transitions)?;
        ActionRule::new(
            self.name.clone(),
            transitions,
            self.fields.clone(),
            self.operations.clone().into_iter().collect(),
        )
    }
}

/// Parse the arrow encoding: comma-separated source statuses, `->`, one
/// target status.
fn parse_transitions(encoded: &str) -> Result<Vec<Transition>> {
    let (sources, target) = encoded
        .split_once("->")
        .ok_or_else(|| WorkflowError::InvalidTransition(encoded.to_string()))?;

    let target = target.trim();
    if target.is_empty() || target.contains(',') {
        return Err(WorkflowError::InvalidTransition(encoded.to_string()));
    }
    let target: crate::types::Target = target.parse()?;

    let mut transitions = Vec::new();
    for source in sources.split(',') {
        let source = source.trim();
        if source.is_empty() {
            return Err(WorkflowError::InvalidTransition(encoded.to_string()));
        }
        transitions.push(Transition::new(source.parse()?, target.clone()));
    }
    Ok(transitions)
}

// ---------------------------------------------------------------------------
// WorkflowConfig
// ---------------------------------------------------------------------------

/// The on-disk workflow description. Actions are a sequence, not a map:
/// their position is the weight consumers order controls by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    pub actions: Vec<ActionSpec>,
}

fn default_version() -> u32 {
    1
}

impl Default for WorkflowConfig {
    /// Spec form of [`RuleTable::default`].
    fn default() -> Self {
        fn spec(
            name: &str,
            transitions: &str,
            fields: &[&str],
            operations: &[(&str, Operation)],
        ) -> ActionSpec {
            ActionSpec {
                name: name.to_string(),
                transitions: transitions.to_string(),
                fields: fields.iter().map(|f| f.to_string()).collect(),
                operations: operations
                    .iter()
                    .map(|(f, op)| (f.to_string(), *op))
                    .collect(),
            }
        }

        Self {
            version: 1,
            actions: vec![
                spec("leave", "* -> *", &[], &[]),
                spec("accept", "new,assigned,accepted,reopened -> accepted", &["owner"], &[]),
                spec("resolve", "new,assigned,accepted,reopened -> closed", &["resolution"], &[]),
                spec("reassign", "new,assigned,accepted,reopened -> assigned", &["owner"], &[]),
                spec(
                    "reopen",
                    "closed -> reopened",
                    &["resolution"],
                    &[("resolution", Operation::Unset)],
                ),
                spec("retarget", "new,assigned,accepted,reopened -> *", &["milestone"], &[]),
                spec(
                    "escalate",
                    "* -> assigned",
                    &["owner", "priority", "resolution"],
                    &[("resolution", Operation::Unset)],
                ),
            ],
        }
    }
}

impl WorkflowConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: WorkflowConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    /// Validate and build the rule table. Malformed rules are rejected here,
    /// once; the resulting table cannot fail those checks at evaluation
    /// time.
    pub fn build(&self) -> Result<RuleTable> {
        let rules = self
            .actions
            .iter()
            .map(ActionSpec::build)
            .collect::<Result<Vec<_>>>()?;
        RuleTable::new(rules)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Check the config for mistakes. Structural problems (the table cannot
    /// be built at all) come back as `Error`; advisory findings as
    /// `Warning`.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let table = match self.build() {
            Ok(table) => table,
            Err(e) => {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: e.to_string(),
                });
                return warnings;
            }
        };

        // 1. Every status should have at least one applicable action.
        //    Well-formed tables carry a catch-all action (conventionally
        //    'leave') so this never fires.
        for status in table.all_statuses() {
            if table.applicable_actions(&status).is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("no action applies to status '{status}'"),
                });
            }
        }

        // 2. A target status that never appears as a source is a dead end
        //    unless some action matches any status.
        let has_catch_all = table
            .iter()
            .any(|r| r.transitions().iter().any(|t| t.source.is_any()));
        if !has_catch_all {
            let sources: std::collections::BTreeSet<&str> = table
                .iter()
                .flat_map(|r| r.transitions().iter())
                .filter_map(|t| match &t.source {
                    crate::types::Source::Status(s) => Some(s.as_str()),
                    crate::types::Source::Any => None,
                })
                .collect();
            let mut reported = std::collections::BTreeSet::new();
            for rule in table.iter() {
                for t in rule.transitions() {
                    if let crate::types::Target::Status(s) = &t.target {
                        if !sources.contains(s.as_str()) && reported.insert(s.clone()) {
                            warnings.push(ConfigWarning {
                                level: WarnLevel::Warning,
                                message: format!(
                                    "status '{s}' is reachable via '{}' but no action leads out of it",
                                    rule.name()
                                ),
                            });
                        }
                    }
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Source, Target};
    use tempfile::TempDir;

    #[test]
    fn parse_single_transition() {
        let transitions = parse_transitions("closed -> reopened").unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].source, Source::Status("closed".to_string()));
        assert_eq!(transitions[0].target, Target::Status("reopened".to_string()));
    }

    #[test]
    fn parse_multiple_sources() {
        let transitions = parse_transitions("new, assigned ,accepted -> closed").unwrap();
        assert_eq!(transitions.len(), 3);
        assert!(transitions
            .iter()
            .all(|t| t.target == Target::Status("closed".to_string())));
    }

    #[test]
    fn parse_wildcards() {
        let transitions = parse_transitions("* -> *").unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].source, Source::Any);
        assert_eq!(transitions[0].target, Target::Unchanged);
    }

    #[test]
    fn parse_rejects_missing_arrow() {
        assert!(matches!(
            parse_transitions("new closed"),
            Err(WorkflowError::InvalidTransition(_))
        ));
    }

    #[test]
    fn parse_rejects_empty_target() {
        assert!(matches!(
            parse_transitions("new -> "),
            Err(WorkflowError::InvalidTransition(_))
        ));
    }

    #[test]
    fn parse_rejects_empty_source() {
        assert!(matches!(
            parse_transitions("new,, assigned -> closed"),
            Err(WorkflowError::InvalidTransition(_))
        ));
    }

    #[test]
    fn parse_rejects_multiple_targets() {
        assert!(matches!(
            parse_transitions("new -> closed,reopened"),
            Err(WorkflowError::InvalidTransition(_))
        ));
    }

    #[test]
    fn default_config_builds_default_table() {
        let table = WorkflowConfig::default().build().unwrap();
        assert_eq!(table, RuleTable::default());
    }

    #[test]
    fn default_config_yaml_roundtrip() {
        let cfg = WorkflowConfig::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: WorkflowConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_yaml_shape() {
        let yaml = r#"
version: 1
actions:
  - name: accept
    transitions: "new,assigned -> accepted"
    fields: [owner]
  - name: reopen
    transitions: "closed -> reopened"
    fields: [resolution]
    operations:
      resolution: unset
"#;
        let cfg: WorkflowConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.actions.len(), 2);
        assert_eq!(cfg.actions[1].operations["resolution"], Operation::Unset);

        let table = cfg.build().unwrap();
        let names: Vec<&str> = table
            .applicable_actions("closed")
            .into_iter()
            .map(|(_, n)| n)
            .collect();
        assert_eq!(names, vec!["reopen"]);
    }

    #[test]
    fn version_defaults_to_one() {
        let yaml = "actions:\n  - name: leave\n    transitions: '* -> *'\n";
        let cfg: WorkflowConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.version, 1);
    }

    #[test]
    fn rejects_unknown_fields() {
        let yaml = "actions:\n  - name: leave\n    transitons: '* -> *'\n";
        assert!(
            serde_yaml::from_str::<WorkflowConfig>(yaml).is_err(),
            "typo in field name should be rejected"
        );
    }

    #[test]
    fn empty_fields_and_operations_not_serialized() {
        let cfg = WorkflowConfig::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        // 'leave' has neither fields nor operations; its entry stays bare.
        assert!(!yaml.contains("fields: []"));
        assert!(!yaml.contains("operations: {}"));
    }

    #[test]
    fn load_save_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("workflow.yaml");

        let cfg = WorkflowConfig::default();
        cfg.save(&path).unwrap();
        let loaded = WorkflowConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn build_reports_operation_for_unlisted_field() {
        let yaml = r#"
actions:
  - name: reopen
    transitions: "closed -> reopened"
    operations:
      resolution: unset
"#;
        let cfg: WorkflowConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            cfg.build(),
            Err(WorkflowError::UnknownOperationField { .. })
        ));
    }

    #[test]
    fn validate_default_config_is_clean() {
        assert!(WorkflowConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_surfaces_build_error() {
        let cfg = WorkflowConfig {
            version: 1,
            actions: vec![
                ActionSpec {
                    name: "leave".to_string(),
                    transitions: "* -> *".to_string(),
                    fields: vec![],
                    operations: BTreeMap::new(),
                },
                ActionSpec {
                    name: "leave".to_string(),
                    transitions: "* -> *".to_string(),
                    fields: vec![],
                    operations: BTreeMap::new(),
                },
            ],
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
        assert!(warnings[0].message.contains("duplicate action"));
    }

    #[test]
    fn validate_warns_on_stranded_status() {
        // 'closed' is reachable but nothing applies to it: no reopen, no
        // catch-all.
        let cfg = WorkflowConfig {
            version: 1,
            actions: vec![ActionSpec {
                name: "resolve".to_string(),
                transitions: "new -> closed".to_string(),
                fields: vec!["resolution".to_string()],
                operations: BTreeMap::new(),
            }],
        };
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Warning && w.message.contains("'closed'")));
    }

    #[test]
    fn validate_catch_all_silences_dead_end_warning() {
        let cfg = WorkflowConfig {
            version: 1,
            actions: vec![
                ActionSpec {
                    name: "leave".to_string(),
                    transitions: "* -> *".to_string(),
                    fields: vec![],
                    operations: BTreeMap::new(),
                },
                ActionSpec {
                    name: "resolve".to_string(),
                    transitions: "new -> closed".to_string(),
                    fields: vec!["resolution".to_string()],
                    operations: BTreeMap::new(),
                },
            ],
        };
        assert!(cfg.validate().is_empty());
    }
}
