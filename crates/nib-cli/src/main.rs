//! nib CLI entry point: parse arguments, set up logging, run the command.

use clap::Parser;
use miette::Result;
use nib_cli::{cli, commands, error, logger, ui};
use nib_config::MigrationWarnings;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    ui::init_colors(args.no_color);
    logger::init_logger(args.verbose, args.quiet, args.no_color);

    // Deprecation warnings are shown once per process.
    let mut warnings = MigrationWarnings::new();

    let name = args.command.name();
    let result = match args.command {
        cli::Command::Build(build_args) => {
            commands::build_execute(build_args, name, &mut warnings).await
        }
        cli::Command::BuildReactApp(build_args) => {
            commands::build_react_app_execute(build_args, name, &mut warnings).await
        }
        cli::Command::BuildWebApp(build_args) => {
            commands::build_web_app_execute(build_args, name, &mut warnings).await
        }
        cli::Command::CleanApp(clean_args) => commands::clean_app_execute(clean_args).await,
        cli::Command::Check(check_args) => {
            commands::check_execute(check_args, name, &mut warnings).await
        }
    };

    result.map_err(error::cli_error_to_miette)
}
