//! Command handlers
//!
//! Every handler that touches protected data goes through [`guarded`]: a
//! fresh gate activation per command, the checking indicator while the
//! probe is in flight, then either the rendered result or a redirect to
//! `partsdesk login`.

mod auth;
mod catalog;
mod dashboard;
mod orders;
mod users;

use std::future::Future;
use std::time::Instant;

use partsdesk_core::session::Guarded;
use partsdesk_infra::api::ApiError;
use serde::Serialize;
use tracing::debug;

use crate::cli::Commands;
use crate::context::AppContext;
use crate::utils::logging::log_command_execution;
use crate::utils::output::{Exit, Output};

/// Dispatch one parsed command.
pub async fn run(ctx: &AppContext, command: Commands, out: Output) -> Exit {
    match command {
        Commands::Login { username, password } => auth::login(ctx, &username, &password, out).await,
        Commands::Register { name, email, password, confirm } => {
            auth::register(ctx, name, email, password, confirm, out).await
        }
        Commands::Logout => auth::logout(ctx, out).await,
        Commands::Whoami => auth::whoami(ctx, out).await,
        Commands::Dashboard => dashboard::show(ctx, out).await,
        Commands::Products { command } => catalog::products(ctx, command, out).await,
        Commands::Suppliers { command } => catalog::suppliers(ctx, command, out).await,
        Commands::Quotes { command } => orders::quotes(ctx, command, out).await,
        Commands::Sales { command } => orders::sales(ctx, command, out).await,
        Commands::Users { command } => users::run(ctx, command, out).await,
    }
}

/// Run `work` behind a fresh gate activation and render its result.
pub(crate) async fn guarded<T, F, Fut>(
    ctx: &AppContext,
    out: Output,
    command: &str,
    work: F,
    render: impl FnOnce(&T) -> String,
) -> Exit
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let started = Instant::now();
    let activation = ctx.gate.activate();

    let indicator = out.checking_indicator(activation.subscribe());
    let state = activation.resolve().await;
    indicator.abort();
    debug!(command, ?state, "session gate resolved");

    let exit = match activation.run(work).await {
        Guarded::Redirected(reason) => out.redirect(&reason),
        Guarded::Rendered(Ok(data)) => out.emit(&data, render),
        Guarded::Rendered(Err(err)) => out.failure(&err),
    };

    log_command_execution(command, started.elapsed(), exit == Exit::Success);
    exit
}

/// Render an unguarded command's result.
pub(crate) fn finish<T: Serialize>(
    out: Output,
    command: &str,
    started: Instant,
    result: Result<T, ApiError>,
    render: impl FnOnce(&T) -> String,
) -> Exit {
    let exit = match result {
        Ok(data) => out.emit(&data, render),
        Err(err) => out.failure(&err),
    };
    log_command_execution(command, started.elapsed(), exit == Exit::Success);
    exit
}

/// Format a money amount the way the dashboard lists it.
pub(crate) fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// `-` for absent optional text.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}
