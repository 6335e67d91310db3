//! CLI argument definitions for the mod message composer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mmh_core::DeleteReason;

#[derive(Parser)]
#[command(
    name = "mmh",
    version,
    about = "Mod Message Helper - custom moderator message templates",
    long_about = "Send moderator messages from custom templates.\n\n\
                  Templates alias a reason the site offers natively; the site's\n\
                  defaults are fetched and overlaid with the template before sending,\n\
                  and the recipient's profile is annotated afterwards."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Settings overrides shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub struct SessionArgs {
    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Site origin, e.g. https://superuser.com.
    #[arg(long = "site", env = "MMH_SITE", value_name = "URL", global = true)]
    pub site: Option<String>,

    /// Cookie header of a signed-in moderator session.
    #[arg(long = "cookie", env = "MMH_COOKIE", hide_env_values = true, global = true)]
    pub cookie: Option<String>,

    /// Anti-forgery token of that session.
    #[arg(long = "fkey", env = "MMH_FKEY", hide_env_values = true, global = true)]
    pub fkey: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the custom templates offered on the site.
    Templates,

    /// Fetch a reason's defaults as the composer would and print them.
    Preview(PreviewArgs),

    /// Compose and send a moderator message.
    Send(SendArgs),

    /// Delete a ban-evasion account and annotate its main account.
    DeleteSock(DeleteSockArgs),
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// System reason id or custom template name.
    #[arg(value_name = "REASON_ID")]
    pub reason: String,
}

#[derive(Parser)]
pub struct SendArgs {
    /// Id of the user the message is about.
    #[arg(long = "user", value_name = "ID")]
    pub user: u64,

    /// System reason id or custom template name.
    #[arg(long = "reason", value_name = "REASON_ID")]
    pub reason: String,

    /// Suspension length, overriding the template default.
    #[arg(long = "days", value_name = "N")]
    pub days: Option<u32>,

    /// Read the message body from a file instead of the template.
    #[arg(long = "body-file", value_name = "PATH")]
    pub body_file: Option<PathBuf>,

    /// Answer yes to every confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,
}

#[derive(Parser)]
pub struct DeleteSockArgs {
    /// Id of the account to delete.
    #[arg(long = "sock", value_name = "ID")]
    pub sock: u64,

    /// Id of the main account to annotate.
    #[arg(long = "main", value_name = "ID")]
    pub main: u64,

    /// Reason recorded with the deletion.
    #[arg(long = "reason", value_enum, default_value = "ban-evasion")]
    pub reason: DeleteReasonArg,

    /// Text placed before the generated deletion details.
    #[arg(long = "details", value_name = "TEXT")]
    pub details: String,

    /// Text placed before the generated annotation.
    #[arg(long = "annotation", value_name = "TEXT")]
    pub annotation: String,

    /// Email address of the deleted account.
    #[arg(long = "email", default_value = "")]
    pub email: String,

    /// Real name of the deleted account.
    #[arg(long = "real-name", default_value = "")]
    pub real_name: String,

    /// Open the message composer for the main account afterwards.
    #[arg(long = "message-after")]
    pub message_after: bool,

    /// Answer yes to every confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,
}

/// CLI deletion reasons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DeleteReasonArg {
    BanEvasion,
    NoLongerWelcome,
}

impl From<DeleteReasonArg> for DeleteReason {
    fn from(value: DeleteReasonArg) -> Self {
        match value {
            DeleteReasonArg::BanEvasion => Self::BanEvasion,
            DeleteReasonArg::NoLongerWelcome => Self::NoLongerWelcome,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
