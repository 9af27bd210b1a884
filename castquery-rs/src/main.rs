//! castquery CLI entry point.

use castquery::cli::args::{Cli, Commands};
use castquery::cli::output::Output;
use castquery::cli::{query, search};
use castquery::config::Config;
use castquery::error::{ExitCode as CastqueryExitCode, SearchError};
use castquery::logging;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli).await {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: &Cli) -> Result<CastqueryExitCode, SearchError> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Parse(args) => {
            query::run_parse(args, &output)?;
            Ok(CastqueryExitCode::Success)
        }
        Commands::Validate(args) => query::run_validate(args, &config, &output),
        Commands::HelpOperators => {
            query::run_help(&output);
            Ok(CastqueryExitCode::Success)
        }
        Commands::Url(args) => {
            query::run_url(args, &config, &output)?;
            Ok(CastqueryExitCode::Success)
        }
        Commands::Sql(args) => {
            query::run_sql(args, &output)?;
            Ok(CastqueryExitCode::Success)
        }
        Commands::Search(args) => {
            search::run(args, &config, &output).await?;
            Ok(CastqueryExitCode::Success)
        }
    }
}
