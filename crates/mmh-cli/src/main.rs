//! Mod Message Helper CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use mmh_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use mmh_cli::commands::{render_defaults, run_delete_sock, run_preview, run_send, run_templates};
use mmh_cli::logging::{LogConfig, LogFormat, init_logging};
use mmh_cli::session::load_settings;
use mmh_cli::summary::{describe_deletion, describe_delivery, describe_submit};
use mmh_cli::terminal::{TerminalNavigator, TerminalNotifier};
use mmh_core::{BanEvasionOutcome, Delivery};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the selected command; `Ok(false)` means it ran but did not succeed.
fn run(cli: Cli) -> Result<bool> {
    let settings = load_settings(&cli.session)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let navigator = TerminalNavigator::stdout();

    match cli.command {
        Command::Templates => {
            println!("{}", run_templates(&settings)?);
            Ok(true)
        }
        Command::Preview(args) => {
            let notifier = TerminalNotifier::stdio(false);
            let delivery =
                runtime.block_on(run_preview(&settings, &args, &notifier, &navigator))?;
            match &delivery {
                Delivery::Apply(defaults) => {
                    println!("{}", render_defaults(defaults)?);
                    Ok(true)
                }
                other => {
                    eprintln!("{}: {}", args.reason, describe_delivery(other));
                    Ok(false)
                }
            }
        }
        Command::Send(args) => {
            let notifier = TerminalNotifier::stdio(args.yes);
            let report = runtime.block_on(run_send(&settings, &args, &notifier, &navigator))?;
            println!("{}", describe_submit(&report.outcome));
            Ok(report.is_success())
        }
        Command::DeleteSock(args) => {
            let notifier = TerminalNotifier::stdio(args.yes);
            let outcome =
                runtime.block_on(run_delete_sock(&settings, &args, &notifier, &navigator))?;
            println!("{}", describe_deletion(&outcome));
            Ok(matches!(outcome, BanEvasionOutcome::Completed { .. }))
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
