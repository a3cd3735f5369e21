//! leafctl - Nissan Leaf command-line control
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::{CommandFactory, Parser};
use std::process::ExitCode;

use leafctl::cli::{self, Cli, OutputOptions};
use leafctl::core::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Bare invocation prints help without touching the settings file.
    let Some(command) = cli.command else {
        return match Cli::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    };

    let log_level = cli
        .log_level
        .as_deref()
        .and_then(logging::LogLevel::from_arg)
        .or_else(logging::parse_log_level_from_env);
    let log_format = if cli.json_output {
        logging::LogFormat::Json
    } else {
        logging::parse_log_format_from_env().unwrap_or_default()
    };
    let log_file = logging::parse_log_file_from_env();
    logging::init(log_level, log_format, log_file, cli.verbose);

    let format = cli.effective_format();
    let output = OutputOptions {
        format,
        pretty: cli.pretty,
        no_color: !leafctl::util::env::should_use_color(cli.no_color),
    };

    match cli::run(command, cli.config.as_deref(), output).await {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            let no_color = cli.no_color || !leafctl::util::env::stderr_is_tty();
            let error_output =
                leafctl::render::error::render_error(&e, format, no_color, cli.pretty);
            eprintln!("{error_output}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
