//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the termkit toolbox.
///
/// Without a subcommand the help text is printed.
#[derive(Parser)]
#[command(name = "termkit")]
#[command(about = "Device report, file server and terminal toys for Termux")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::parse_from(["termkit", "device", "--verbose"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Device { .. })));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["termkit"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }
}
