//! Message commands: send and template scaffolding

use std::path::PathBuf;

use clap::{Args, Subcommand};
use elsterctl_app::MessageSendService;
use elsterctl_core::config::{
    env_non_empty, DEFAULT_DATA_TYPE_VERSION, DEFAULT_PIN_ENV, ENV_DEFAULT_CERTIFICATE,
    ENV_DEFAULT_DATA_TYPE_VERSION, ENV_HERSTELLER_ID,
};
use elsterctl_core::model::SubmissionRequest;
use elsterctl_core::secrets::EnvSecretSource;
use elsterctl_core::template::MessageTemplate;
use elsterctl_eric::NativeGatewayFactory;

use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct MessageArgs {
    #[command(subcommand)]
    pub command: MessageCommand,
}

#[derive(Debug, Subcommand)]
pub enum MessageCommand {
    /// Send a message XML via ERiC
    Send(SendArgs),
    /// Create a starter XML file for `message send`
    CreateTemplate(CreateTemplateArgs),
}

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Path to the ERiC transfer XML
    #[arg(long)]
    pub xml: PathBuf,

    /// Certificate file (pfx/p12); falls back to the global option, then ELSTER_DEFAULT_CERTIFICATE
    #[arg(long)]
    pub certificate: Option<PathBuf>,

    /// Environment variable name holding the certificate PIN
    #[arg(long, default_value = DEFAULT_PIN_ENV)]
    pub pin_env: String,

    /// ERiC data type version; falls back to ELSTER_DEFAULT_DATA_TYPE_VERSION, then TH11
    #[arg(long)]
    pub data_type_version: Option<String>,

    /// Run ERiC validation before submission (default)
    #[arg(long, overrides_with = "no_validate")]
    pub validate: bool,

    /// Submit without ERiC validation
    #[arg(long, overrides_with = "validate")]
    pub no_validate: bool,
}

#[derive(Debug, Args)]
pub struct CreateTemplateArgs {
    /// Path where the generated XML template is written
    #[arg(long)]
    pub output: PathBuf,

    /// Registered ELSTER manufacturer ID; falls back to the global option, then ELSTER_HERSTELLER_ID
    #[arg(long)]
    pub hersteller_id: Option<String>,

    /// Value for TransferHeader/DatenLieferant [default: elsterctl]
    #[arg(long)]
    pub daten_lieferant: Option<String>,

    /// Message subject placeholder
    #[arg(long)]
    pub subject: Option<String>,

    /// Message body placeholder
    #[arg(long)]
    pub body: Option<String>,

    /// Test marker for ELSTER test runs [default: 700000004]
    #[arg(long)]
    pub testmerker: Option<String>,
}

pub fn execute(args: MessageArgs, ctx: &Context) -> CommandResult {
    match args.command {
        MessageCommand::Send(send_args) => execute_send(send_args, ctx),
        MessageCommand::CreateTemplate(template_args) => execute_create_template(template_args, ctx),
    }
}

fn execute_send(args: SendArgs, ctx: &Context) -> CommandResult {
    println!("Effective transfer mode: {}", ctx.transfer_mode);

    let certificate = args
        .certificate
        .or_else(|| ctx.global.certificate.clone())
        .or_else(|| env_non_empty(ENV_DEFAULT_CERTIFICATE).map(PathBuf::from))
        .ok_or(
            "Missing certificate path. Provide --certificate either globally or for message send, \
             or set ELSTER_DEFAULT_CERTIFICATE.",
        )?;

    let data_type_version = args
        .data_type_version
        .or_else(|| env_non_empty(ENV_DEFAULT_DATA_TYPE_VERSION))
        .unwrap_or_else(|| DEFAULT_DATA_TYPE_VERSION.to_string());

    let request = SubmissionRequest::new(
        args.xml,
        certificate,
        args.pin_env,
        data_type_version,
        ctx.transfer_mode,
        !args.no_validate,
    );

    let factory = NativeGatewayFactory::from_env();
    let secrets = EnvSecretSource;
    let result = MessageSendService::new(&factory, &secrets).send(&request)?;

    tracing::debug!(
        op = "message_send",
        eric_response = %result.eric_response_xml,
        server_response = %result.server_response_xml,
    );

    println!("ERiC result code: {}", result.result_code);
    if let Some(ticket) = &result.transfer_ticket {
        println!("Transfer ticket: {}", ticket);
    }
    println!("Message submission completed.");
    Ok(())
}

fn execute_create_template(args: CreateTemplateArgs, ctx: &Context) -> CommandResult {
    let hersteller_id = args
        .hersteller_id
        .or_else(|| ctx.global.hersteller_id.clone())
        .or_else(|| env_non_empty(ENV_HERSTELLER_ID))
        .ok_or("Missing Hersteller-ID. Provide --hersteller-id or set ELSTER_HERSTELLER_ID.")?;

    let defaults = MessageTemplate::new(hersteller_id);
    let template = MessageTemplate {
        daten_lieferant: args.daten_lieferant.unwrap_or(defaults.daten_lieferant),
        subject: args.subject.unwrap_or(defaults.subject),
        body: args.body.unwrap_or(defaults.body),
        testmerker: args.testmerker.unwrap_or(defaults.testmerker),
        hersteller_id: defaults.hersteller_id,
    };

    template.write_to(&args.output)?;
    println!("Template written: {}", args.output.display());
    Ok(())
}
