//! Command-line interface built on clap.
//!
//! Defines [`Cli`] with the [`Command`] subcommands (demo, accuse, records)
//! and the global flags (--config, --channel, --verbose).

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Flag crew records as wanted from a security visor and broadcast it.
#[derive(Debug, Parser)]
#[command(name = "wanted-status", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file to use instead of `wanted.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Radio channel to broadcast on, overriding the config.
    #[arg(long, global = true)]
    pub channel: Option<String>,

    /// Increase log verbosity (-v info, -vv trace).
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs the built-in scenario: accuses Alice, then Bob twice.
    Demo,

    /// Loads a scenario and raises one accusation in it.
    Accuse {
        /// Scenario file (.toml or .json).
        #[arg(long)]
        scenario: PathBuf,

        /// Entity id of the officer using the visor.
        #[arg(long)]
        accuser: u64,

        /// Entity id of the crew member being accused.
        #[arg(long)]
        accused: u64,

        /// Reason recorded with the status change.
        #[arg(long)]
        reason: Option<String>,

        /// Visor entity id. Defaults to the first visor in the scenario.
        #[arg(long)]
        visor: Option<u64>,

        /// Print the broadcasts as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Prints the station rosters of a scenario.
    Records {
        /// Scenario file (.toml or .json).
        #[arg(long)]
        scenario: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_accuse_subcommand() {
        let cli = Cli::parse_from([
            "wanted-status",
            "accuse",
            "--scenario",
            "crew.toml",
            "--accuser",
            "10",
            "--accused",
            "20",
            "--reason",
            "theft",
        ]);
        match cli.command {
            Command::Accuse {
                scenario,
                accuser,
                accused,
                reason,
                visor,
                json,
            } => {
                assert_eq!(scenario, PathBuf::from("crew.toml"));
                assert_eq!(accuser, 10);
                assert_eq!(accused, 20);
                assert_eq!(reason.as_deref(), Some("theft"));
                assert!(visor.is_none());
                assert!(!json);
            }
            _ => panic!("expected Accuse command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["wanted-status", "-vv", "--channel", "Command", "demo"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.channel.as_deref(), Some("Command"));
        assert!(matches!(cli.command, Command::Demo));
    }

    #[test]
    fn cli_requires_scenario_for_records() {
        assert!(Cli::try_parse_from(["wanted-status", "records"]).is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
