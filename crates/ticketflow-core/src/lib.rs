pub mod config;
pub mod control;
pub mod error;
pub mod io;
pub mod query;
pub mod rule;
pub mod table;
pub mod types;

pub use error::{Result, WorkflowError};
pub use rule::ActionRule;
pub use table::RuleTable;
