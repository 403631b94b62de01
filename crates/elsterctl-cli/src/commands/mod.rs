pub mod config;
pub mod message;

use std::path::PathBuf;

use clap::Args;
use elsterctl_core::{resolve_with_policy, EnvForcePolicy, TransferMode};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Options accepted before the command name
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Transfer mode for all commands: prod or test
    #[arg(long, value_parser = parse_transfer_mode)]
    pub transfer_mode: Option<TransferMode>,

    /// Use the test transfer mode (ignored when --transfer-mode is given)
    #[arg(long)]
    pub test_transfer_mode: bool,

    /// Default certificate path (pfx/p12)
    #[arg(long)]
    pub certificate: Option<PathBuf>,

    /// Default ELSTER manufacturer ID
    #[arg(long)]
    pub hersteller_id: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

fn parse_transfer_mode(value: &str) -> Result<TransferMode, String> {
    value.parse().map_err(|e: elsterctl_core::ElsterError| e.to_string())
}

/// Global options plus the transfer mode resolved for this invocation
#[derive(Debug, Clone)]
pub struct Context {
    pub global: GlobalArgs,
    pub transfer_mode: TransferMode,
}

impl Context {
    /// Resolve the transfer mode once, applying the environment force policy
    pub fn resolve(global: GlobalArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let transfer_mode = resolve_with_policy(
            global.transfer_mode,
            global.test_transfer_mode,
            &EnvForcePolicy::new(),
        )?;
        Ok(Self {
            global,
            transfer_mode,
        })
    }
}
