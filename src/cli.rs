use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::error::ProfileError;
use crate::profile_engine::Street;

/// Build OpenHoldem rule profiles from a settings file.
#[derive(Parser, Debug)]
#[command(name = "poker_profile_gen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Settings JSON file. Missing keys take their documented defaults.
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Increase logging verbosity (-v debug, -vv trace). `RUST_LOG` wins.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate one street or the full profile.
    Generate {
        /// `all`, `preflop`, `flop`, `turn` or `river`.
        #[arg(long, default_value = "all")]
        street: StreetArg,

        /// Write the profile here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print every documented setting with its default as JSON.
    Defaults,
}

impl Default for Command {
    fn default() -> Self {
        Command::Generate { street: StreetArg::All, output: None }
    }
}

/// Street selection on the command line: one street, or `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreetArg {
    All,
    One(Street),
}

impl StreetArg {
    /// `None` means every street.
    pub fn street(self) -> Option<Street> {
        match self {
            StreetArg::All => None,
            StreetArg::One(street) => Some(street),
        }
    }
}

impl FromStr for StreetArg {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StreetArg::All)
        } else {
            s.parse().map(StreetArg::One)
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_the_default_command() {
        let cli = Cli::try_parse_from(["poker_profile_gen"]).unwrap();
        assert_eq!(cli.command.clone().unwrap_or_default(), Command::default());
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn parses_street_output_and_settings() {
        let cli = Cli::try_parse_from([
            "poker_profile_gen", "generate", "--street", "flop", "-o", "flop.txt", "--settings", "s.json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("s.json")));
        assert_eq!(cli.log_level(), "trace");
        match cli.command {
            Some(Command::Generate { street, output }) => {
                assert_eq!(street.street(), Some(Street::Flop));
                assert_eq!(output, Some(PathBuf::from("flop.txt")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_street_is_rejected() {
        assert!(Cli::try_parse_from(["poker_profile_gen", "generate", "--street", "showdown"]).is_err());
    }

    #[test]
    fn street_argument_parses_like_the_street_names() {
        assert_eq!("all".parse::<StreetArg>().unwrap(), StreetArg::All);
        assert_eq!("River".parse::<StreetArg>().unwrap().street(), Some(Street::River));
        let cli = Cli::try_parse_from(["poker_profile_gen", "generate", "--street", "PREFLOP"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Generate { street: StreetArg::One(Street::Preflop), output: None })
        );
    }
}
