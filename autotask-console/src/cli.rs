use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "autotask-console")]
#[command(about = "Record Autotask time entries from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Sign in and record time entries (default)
    Run,
    /// Run against local in-memory data
    Dev,
    /// Delete the remembered username and password
    Forget,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["autotask-console"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn parses_kebab_case_subcommands() {
        let cli = Cli::try_parse_from(["autotask-console", "config-path"]).unwrap();
        assert_eq!(cli.command, Some(Commands::ConfigPath));
    }
}
