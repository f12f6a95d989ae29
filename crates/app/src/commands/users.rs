//! staff accounts

use partsdesk_core::filter_by_name;
use partsdesk_domain::{User, UserPageQuery};
use partsdesk_infra::api::ApiError;
use serde_json::{json, Value};

use super::guarded;
use crate::cli::UserCommands;
use crate::context::AppContext;
use crate::utils::output::{rows, Exit, Output};

pub(super) async fn run(ctx: &AppContext, command: UserCommands, out: Output) -> Exit {
    match command {
        UserCommands::List { search, page, limit } => {
            let work = || async {
                if page.is_some() || limit.is_some() {
                    let query = UserPageQuery { index: page, limit, search };
                    return ctx.users.paginated(&query).await;
                }
                let users = ctx.users.list().await?;
                let matched = filter_by_name(&users, search.as_deref().unwrap_or_default());
                Ok(matched.into_iter().cloned().collect())
            };
            guarded(ctx, out, "users.list", work, |users: &Vec<User>| rows(users, user_row)).await
        }
        UserCommands::Show { id } => {
            guarded(ctx, out, "users.show", || ctx.users.get(id), user_row).await
        }
        UserCommands::Activate { id } => set_status(ctx, out, id, true).await,
        UserCommands::Deactivate { id } => set_status(ctx, out, id, false).await,
    }
}

async fn set_status(ctx: &AppContext, out: Output, id: i64, active: bool) -> Exit {
    let command = if active { "users.activate" } else { "users.deactivate" };
    let work = || async {
        ctx.users.update_status(id, active).await?;
        Ok::<Value, ApiError>(json!({ "id": id, "active": active }))
    };
    guarded(ctx, out, command, work, |_| {
        format!("User {id} {}", if active { "activated" } else { "deactivated" })
    })
    .await
}

fn user_row(user: &User) -> String {
    let role = user.role.map_or_else(|| "-".to_string(), |role| role.to_string());
    let state = if user.active { "active" } else { "inactive" };
    format!("{}\t{}\t{}\t{role}\t{state}", user.id, user.name, user.email)
}
