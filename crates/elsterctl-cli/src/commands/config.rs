//! `config show`: print the effective configuration

use std::path::Path;

use clap::{Args, Subcommand};
use elsterctl_core::config::{
    env_non_empty, DEFAULT_DATA_TYPE_VERSION, DEFAULT_PIN_ENV, ENV_DEFAULT_CERTIFICATE,
    ENV_DEFAULT_DATA_TYPE_VERSION, ENV_HERSTELLER_ID,
};
use elsterctl_core::policy::{EnvForcePolicy, ForcePolicySource};
use elsterctl_core::secrets::{EnvSecretSource, SecretSource};
use elsterctl_eric::EricConfig;
use serde::Serialize;

use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved configuration
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Environment variable name holding the certificate PIN
    #[arg(long, default_value = DEFAULT_PIN_ENV)]
    pub pin_env: String,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Resolved configuration; the PIN itself is never included
#[derive(Debug, Serialize)]
struct ConfigView {
    transfer_mode: String,
    force_test_transfer_mode: bool,
    eric_library: Option<String>,
    eric_plugin_dir: Option<String>,
    eric_log_dir: Option<String>,
    certificate: Option<String>,
    data_type_version: String,
    hersteller_id: Option<String>,
    pin_env: String,
    pin_set: bool,
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

impl ConfigView {
    fn collect(ctx: &Context, pin_env: String) -> Self {
        let eric = EricConfig::from_env();
        let pin_set = EnvSecretSource
            .lookup(&pin_env)
            .is_some_and(|pin| !pin.is_empty());

        Self {
            transfer_mode: ctx.transfer_mode.to_string(),
            force_test_transfer_mode: EnvForcePolicy::new().force_test_enabled(),
            eric_library: eric.library_path().ok().map(display_path),
            eric_plugin_dir: eric.plugin_dir().ok().as_deref().map(display_path),
            eric_log_dir: eric.log_dir().map(display_path),
            certificate: ctx
                .global
                .certificate
                .as_deref()
                .map(display_path)
                .or_else(|| env_non_empty(ENV_DEFAULT_CERTIFICATE)),
            data_type_version: env_non_empty(ENV_DEFAULT_DATA_TYPE_VERSION)
                .unwrap_or_else(|| DEFAULT_DATA_TYPE_VERSION.to_string()),
            hersteller_id: ctx
                .global
                .hersteller_id
                .clone()
                .or_else(|| env_non_empty(ENV_HERSTELLER_ID)),
            pin_env,
            pin_set,
        }
    }

    fn print_human(&self) {
        let unset = || "(not set)".to_string();
        println!("transfer_mode:            {}", self.transfer_mode);
        println!("force_test_transfer_mode: {}", self.force_test_transfer_mode);
        println!("eric_library:             {}", self.eric_library.clone().unwrap_or_else(unset));
        println!("eric_plugin_dir:          {}", self.eric_plugin_dir.clone().unwrap_or_else(unset));
        println!("eric_log_dir:             {}", self.eric_log_dir.clone().unwrap_or_else(unset));
        println!("certificate:              {}", self.certificate.clone().unwrap_or_else(unset));
        println!("data_type_version:        {}", self.data_type_version);
        println!("hersteller_id:            {}", self.hersteller_id.clone().unwrap_or_else(unset));
        println!("pin_env:                  {}", self.pin_env);
        println!("pin_set:                  {}", self.pin_set);
    }
}

pub fn execute(args: ConfigArgs, ctx: &Context) -> CommandResult {
    match args.command {
        ConfigCommand::Show(show_args) => {
            let view = ConfigView::collect(ctx, show_args.pin_env);
            if show_args.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                view.print_human();
            }
            Ok(())
        }
    }
}
