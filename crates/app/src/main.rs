//! PartsDesk - warehouse administration from the terminal

#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use partsdesk_app::cli::Cli;
use partsdesk_app::utils::logging::init_tracing;
use partsdesk_app::utils::output::Output;
use partsdesk_app::{commands, AppContext};
use partsdesk_infra::config;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = config::load().context("failed to load configuration")?;
    if let Some(api_url) = cli.api_url.as_deref() {
        config.api.base_url =
            config::normalize_base_url(api_url).context("invalid --api-url")?;
    }

    init_tracing(&config.logging)?;
    debug!(base_url = %config.api.base_url, "configuration loaded");

    let ctx = AppContext::new(config).context("failed to initialise application")?;
    let exit = commands::run(&ctx, cli.command, Output::new(cli.json)).await;
    Ok(exit.into())
}
