mod api;
mod bootstrap;
mod cli;
mod config;
mod credential_store;
mod entry_loop;
mod logging;
mod project_cache;
mod prompt;
mod session;
mod table;
mod terminal;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use api::{AutotaskConnector, DevBackend, ServiceConnector};
use cli::{Cli, Commands};
use config::ConsoleConfig;
use session::{report_outcome, run_session, WorkflowSettings};
use terminal::{styled, Status, StdTerminal, Terminal};

const DEV_CREDENTIALS_FILE: &str = "dev-prefs.json";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ConsoleConfig::load()?;
    logging::init_logging(&config.log_level)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let connector =
                AutotaskConnector::new(&config.service_url, config.integration_code.clone());
            let settings = workflow_settings(&config, config.credentials_path()?);
            run(&connector, &settings).await
        }
        Commands::Dev => {
            let settings =
                workflow_settings(&config, config::root_path()?.join(DEV_CREDENTIALS_FILE));
            println!(
                "Dev mode: sign in as `{}` with any password.",
                api::DEV_USERNAME
            );
            run(&DevBackend::new(), &settings).await
        }
        Commands::Forget => {
            let path = config.credentials_path()?;
            if credential_store::clear(&path)? {
                println!("Removed saved credentials at {}", path.display());
            } else {
                println!("No saved credentials at {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::ConfigPath => {
            let path = ConsoleConfig::config_path()?;
            if !path.exists() {
                ConsoleConfig::default().save_to(&path)?;
            }
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn workflow_settings(config: &ConsoleConfig, credentials_path: PathBuf) -> WorkflowSettings {
    WorkflowSettings {
        credentials_path,
        account_name: config.account_name.clone(),
        project_label: config.project_label.clone(),
    }
}

async fn run<C: ServiceConnector>(connector: &C, settings: &WorkflowSettings) -> Result<ExitCode> {
    let mut terminal = StdTerminal::new();
    terminal.status(Status::Hint, "Press Ctrl+C to quit at any time.");

    let outcome = tokio::select! {
        result = run_session(connector, &mut terminal, settings) => result,
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("{}", styled(Status::Farewell, "goodbye"));
            // Piped input may still be blocking a reader thread.
            std::process::exit(0);
        }
    };

    if report_outcome(&outcome, &mut terminal) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
