//! elsterctl CLI
//!
//! Command-line interface for ELSTER submissions through ERiC

use clap::{Parser, Subcommand};
use elsterctl_core::config::{env_non_empty, ENV_LOG_FORMAT};
use elsterctl_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "elsterctl")]
#[command(about = "elsterctl - ELSTER submissions through ERiC", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Communication with German tax offices
    Message(commands::message::MessageArgs),
    /// Inspect the effective configuration
    Config(commands::config::ConfigArgs),
}

fn logging_profile(verbose: bool) -> Profile {
    if verbose {
        Profile::Verbose
    } else if env_non_empty(ENV_LOG_FORMAT).is_some_and(|f| f.eq_ignore_ascii_case("json")) {
        Profile::Json
    } else {
        Profile::Human
    }
}

fn main() {
    // Variables already set in the process environment take precedence.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging_facility::init(logging_profile(cli.global.verbose));

    let result = commands::Context::resolve(cli.global).and_then(|ctx| match cli.command {
        Commands::Message(args) => commands::message::execute(args, &ctx),
        Commands::Config(args) => commands::config::execute(args, &ctx),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
