use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use poker_profile_gen::cli::{Cli, Command};
use poker_profile_gen::error::Result;
use poker_profile_gen::{generate_full_profile, generate_street, Settings};

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only the profile.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::new(),
    };

    match cli.command.unwrap_or_default() {
        Command::Generate { street, output } => {
            let profile = match street.street() {
                Some(street) => generate_street(street, &settings)?,
                None => generate_full_profile(&settings)?,
            };
            emit(&profile, output.as_deref())
        }
        Command::Defaults => {
            println!("{}", Settings::defaults_json()?);
            Ok(())
        }
    }
}

fn emit(profile: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, profile)?;
            info!(path = %path.display(), bytes = profile.len(), "profile written");
        }
        None => println!("{profile}"),
    }
    Ok(())
}
