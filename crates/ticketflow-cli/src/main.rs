mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ticketflow",
    about = "Ticket workflow rule tables — which actions apply, which fields they govern, what they change",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workflow config file (default: the built-in workflow)
    #[arg(long, global = true, env = "TICKETFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the actions applicable to a ticket status
    Actions {
        /// Current ticket status (empty counts as 'new')
        #[arg(long, default_value = "new")]
        status: String,
    },

    /// List the fields governed by the applicable actions
    Fields {
        /// Current ticket status (empty counts as 'new')
        #[arg(long, default_value = "new")]
        status: String,
    },

    /// List every status the workflow mentions
    Statuses,

    /// Describe an action's control: inputs to render and hints to show
    Show {
        /// Action name
        action: String,

        /// Current ticket status
        #[arg(long, default_value = "new")]
        status: String,

        /// Current field value, repeatable (field=value)
        #[arg(long = "value", value_name = "FIELD=VALUE")]
        values: Vec<String>,
    },

    /// Compute the field and status changes an action produces
    Apply {
        /// Action name
        action: String,

        /// Current ticket status
        #[arg(long, default_value = "new")]
        status: String,

        /// Submitted field value, repeatable (field=value)
        #[arg(long = "value", value_name = "FIELD=VALUE")]
        values: Vec<String>,
    },

    /// Check the workflow config for mistakes
    Validate,

    /// Write the default workflow config to a file
    Init {
        /// Destination path
        #[arg(default_value = "workflow.yaml")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Actions { status } => cmd::load_table(config)
            .and_then(|table| cmd::actions::run(&table, &status, cli.json)),
        Commands::Fields { status } => cmd::load_table(config)
            .and_then(|table| cmd::fields::run(&table, &status, cli.json)),
        Commands::Statuses => {
            cmd::load_table(config).and_then(|table| cmd::statuses::run(&table, cli.json))
        }
        Commands::Show {
            action,
            status,
            values,
        } => cmd::load_table(config).and_then(|table| {
            let values = cmd::parse_values(&values)?;
            cmd::show::run(&table, &action, &status, &values, cli.json)
        }),
        Commands::Apply {
            action,
            status,
            values,
        } => cmd::load_table(config).and_then(|table| {
            let values = cmd::parse_values(&values)?;
            cmd::apply::run(&table, &action, &status, &values, cli.json)
        }),
        Commands::Validate => cmd::validate::run(config, cli.json),
        Commands::Init { path } => cmd::init::run(&path),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
