//! login, register, logout, whoami
//!
//! None of these pass through the session gate: they are how a user gets a
//! credential in the first place, or inspect the one stored locally.

use std::time::Instant;

use partsdesk_core::session::DenyReason;
use partsdesk_domain::{RegisterRequest, User};
use serde::Serialize;
use serde_json::Value;

use super::{finish, or_dash};
use crate::context::AppContext;
use crate::utils::logging::log_command_execution;
use crate::utils::output::{Exit, Output};

#[derive(Debug, Serialize)]
struct SignedIn {
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

pub(super) async fn login(ctx: &AppContext, username: &str, password: &str, out: Output) -> Exit {
    let started = Instant::now();
    let result = ctx.auth.login(username, password).await.map(|response| SignedIn {
        username: username.trim().to_string(),
        user: response.data.and_then(|data| data.user),
    });

    finish(out, "login", started, result, |signed_in| match &signed_in.user {
        Some(user) => format!("Signed in as {} <{}>", user.name, user.email),
        None => format!("Signed in as {}", signed_in.username),
    })
}

pub(super) async fn register(
    ctx: &AppContext,
    name: String,
    email: String,
    password: String,
    confirm: String,
    out: Output,
) -> Exit {
    let started = Instant::now();
    let request = RegisterRequest::seller(name, email, password, confirm);
    let result = ctx.auth.register(&request).await.map(|response| {
        response.message.unwrap_or_else(|| "account created".to_string())
    });

    finish(out, "register", started, result, |message| {
        format!("{message}\nSign in with `partsdesk login {}`", request.username)
    })
}

pub(super) async fn logout(ctx: &AppContext, out: Output) -> Exit {
    let started = Instant::now();
    let result = ctx.auth.logout().await.map(|()| Value::Null);
    finish(out, "logout", started, result, |_| "Signed out".to_string())
}

pub(super) async fn whoami(ctx: &AppContext, out: Output) -> Exit {
    let started = Instant::now();
    let claims = match ctx.auth.whoami().await {
        Ok(Some(claims)) => claims,
        Ok(None) => {
            log_command_execution("whoami", started.elapsed(), false);
            return out.redirect(&DenyReason::MissingCredential);
        }
        Err(err) => return finish(out, "whoami", started, Err::<Value, _>(err), |_| String::new()),
    };

    let profile_id = claims.profile_id().map(|id| id.to_string());
    let text = [
        format!("subject:    {}", or_dash(claims.subject())),
        format!("profile id: {}", or_dash(profile_id.as_deref())),
        format!("email:      {}", or_dash(claims.email())),
    ]
    .join("\n");

    finish(out, "whoami", started, Ok(claims.as_map().clone()), move |_| text)
}
