//! User-facing output
//!
//! Results go to stdout, either as text rows or wrapped as
//! `{"ok": true, "data": ...}` with `--json`. Progress and error text go to
//! stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;
use std::time::Duration;

use partsdesk_core::session::{DenyReason, GateState};
use partsdesk_infra::api::ApiError;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::logging::error_label;

/// Delay before the session-check indicator appears
const INDICATOR_DELAY: Duration = Duration::from_millis(150);

/// How the process should exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    /// The command ran and failed
    Failed,
    /// The session gate sent the user back to login
    SignedOut,
}

impl From<Exit> for ExitCode {
    fn from(value: Exit) -> Self {
        match value {
            Exit::Success => ExitCode::SUCCESS,
            Exit::Failed => ExitCode::from(1),
            Exit::SignedOut => ExitCode::from(3),
        }
    }
}

#[derive(Serialize)]
struct JsonOut<'a, T: Serialize> {
    ok: bool,
    data: &'a T,
}

#[derive(Serialize)]
struct JsonError<'a> {
    ok: bool,
    error: &'a str,
    message: String,
}

/// Writer for command results
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print `data` as JSON or as the text produced by `text`.
    pub fn emit<T: Serialize>(&self, data: &T, text: impl FnOnce(&T) -> String) -> Exit {
        if self.json {
            match serde_json::to_string_pretty(&JsonOut { ok: true, data }) {
                Ok(body) => println!("{body}"),
                Err(err) => {
                    eprintln!("error: could not encode output: {err}");
                    return Exit::Failed;
                }
            }
        } else {
            let body = text(data);
            if !body.is_empty() {
                println!("{body}");
            }
        }
        Exit::Success
    }

    /// Report a failed command.
    pub fn failure(&self, err: &ApiError) -> Exit {
        self.error(error_label(err), err.message())
    }

    /// Report a denied session and point at `partsdesk login`.
    pub fn redirect(&self, reason: &DenyReason) -> Exit {
        let message = format!("{reason}; run `partsdesk login` to sign in");
        self.error("signed_out", message);
        Exit::SignedOut
    }

    fn error(&self, label: &str, message: String) -> Exit {
        if self.json {
            let body = JsonError { ok: false, error: label, message };
            match serde_json::to_string_pretty(&body) {
                Ok(body) => println!("{body}"),
                Err(_) => eprintln!("error: {}", body.message),
            }
        } else {
            eprintln!("error: {message}");
        }
        Exit::Failed
    }

    /// Show a neutral "checking session" line on stderr if the gate is
    /// still undecided after a short delay. Abort the handle once the gate
    /// resolves.
    pub fn checking_indicator(&self, mut states: watch::Receiver<GateState>) -> JoinHandle<()> {
        let quiet = self.json;
        tokio::spawn(async move {
            let pending =
                tokio::time::timeout(INDICATOR_DELAY, states.wait_for(GateState::is_terminal))
                    .await
                    .is_err();
            if pending && !quiet {
                eprintln!("Checking session...");
            }
        })
    }
}

/// Tab-separated rows, one per item.
pub fn rows<T>(items: &[T], row: impl Fn(&T) -> String) -> String {
    items.iter().map(row).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_join_lines() {
        assert_eq!(rows(&[1, 2, 3], |n| format!("#{n}")), "#1\n#2\n#3");
        assert_eq!(rows::<i32>(&[], |n| n.to_string()), "");
    }

    #[test]
    fn exit_codes() {
        assert_eq!(Output::new(true).redirect(&DenyReason::MissingCredential), Exit::SignedOut);
        assert_eq!(Output::new(false).failure(&ApiError::Server("down".into())), Exit::Failed);
    }
}
