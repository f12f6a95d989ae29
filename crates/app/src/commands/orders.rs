//! quotes and sales
//!
//! `create` builds a draft from `--item ID:QTY` lines, pricing each line
//! from the product's current catalog entry.

use partsdesk_core::orders::DraftLines;
use partsdesk_core::{filter_by_name, QuoteDraft, SaleDraft};
use partsdesk_domain::{OrderLine, Quote, Sale};
use partsdesk_infra::api::ApiError;
use serde_json::Value;

use super::{guarded, money, or_dash};
use crate::cli::{LineSpec, QuoteCommands, SaleCommands};
use crate::context::AppContext;
use crate::utils::output::{rows, Exit, Output};

pub(super) async fn quotes(ctx: &AppContext, command: QuoteCommands, out: Output) -> Exit {
    match command {
        QuoteCommands::List { search } => {
            let work = || async {
                let quotes = ctx.quotes.list().await?;
                let matched = filter_by_name(&quotes, search.as_deref().unwrap_or_default());
                Ok::<_, ApiError>(matched.into_iter().cloned().collect::<Vec<_>>())
            };
            guarded(ctx, out, "quotes.list", work, |quotes| rows(quotes, quote_row)).await
        }
        QuoteCommands::Show { id } => {
            guarded(ctx, out, "quotes.show", || ctx.quotes.get(id), quote_detail).await
        }
        QuoteCommands::Create { customer, email, items } => {
            let work = || async {
                let mut draft = QuoteDraft::new(customer, email);
                price_lines(ctx, &mut draft.lines, &items).await?;
                let request = draft.to_request()?;
                ctx.quotes.create(&request).await
            };
            guarded(ctx, out, "quotes.create", work, |quote| {
                format!(
                    "Created quote {} for {} ({})",
                    quote_label(quote),
                    quote.customer_name,
                    money(quote.total)
                )
            })
            .await
        }
        QuoteCommands::Delete { id } => {
            let work = || async { ctx.quotes.delete(id).await.map(|()| Value::Null) };
            guarded(ctx, out, "quotes.delete", work, |_| format!("Deleted quote {id}")).await
        }
        QuoteCommands::Email { id } => {
            let work = || async {
                let message = ctx.quotes.send_email(id).await?;
                Ok::<_, ApiError>(message.unwrap_or_else(|| format!("Quote {id} sent")))
            };
            guarded(ctx, out, "quotes.email", work, String::clone).await
        }
    }
}

pub(super) async fn sales(ctx: &AppContext, command: SaleCommands, out: Output) -> Exit {
    match command {
        SaleCommands::List => {
            let render = |sales: &Vec<Sale>| rows(sales, sale_row);
            guarded(ctx, out, "sales.list", || ctx.sales.list(), render).await
        }
        SaleCommands::Show { id } => {
            guarded(ctx, out, "sales.show", || ctx.sales.get(id), sale_detail).await
        }
        SaleCommands::Create { customer, email, phone, payment, items } => {
            let work = || async {
                let mut draft = SaleDraft::new(customer, payment.into());
                draft.customer_email = email;
                draft.customer_phone = phone;
                price_lines(ctx, &mut draft.lines, &items).await?;
                let request = draft.to_request()?;
                ctx.sales.create(&request).await
            };
            guarded(ctx, out, "sales.create", work, |sale| {
                format!(
                    "Recorded sale {} for {} ({})",
                    sale.id,
                    sale.customer_name,
                    money(sale.total)
                )
            })
            .await
        }
    }
}

/// Look up each product and add it to `lines` at its current price.
async fn price_lines(
    ctx: &AppContext,
    lines: &mut DraftLines,
    items: &[LineSpec],
) -> Result<(), ApiError> {
    for item in items {
        let product = ctx.products.get(item.product_id).await.map_err(|err| match err {
            ApiError::NotFound(_) => {
                ApiError::NotFound(format!("product {} does not exist", item.product_id))
            }
            other => other,
        })?;
        lines.add(&product, item.quantity)?;
    }
    Ok(())
}

fn quote_label(quote: &Quote) -> String {
    if quote.code.is_empty() {
        format!("#{}", quote.id)
    } else {
        quote.code.clone()
    }
}

fn quote_row(quote: &Quote) -> String {
    let status = quote.status.as_ref().map(ToString::to_string);
    let date = quote.date.map(|date| date.format("%Y-%m-%d").to_string());
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        quote.id,
        quote_label(quote),
        quote.customer_name,
        or_dash(date.as_deref()),
        money(quote.total),
        or_dash(status.as_deref()),
    )
}

fn quote_detail(quote: &Quote) -> String {
    let mut text = vec![
        format!("{} {}", quote_label(quote), quote.customer_name),
        format!("email:  {}", or_dash(Some(quote.customer_email.as_str()))),
        format!("status: {}", quote.status.as_ref().map_or_else(|| "-".to_string(), ToString::to_string)),
        format!("total:  {}", money(quote.total)),
    ];
    text.extend(quote.items.iter().flatten().map(line_row));
    text.join("\n")
}

fn sale_row(sale: &Sale) -> String {
    let date = sale.date.map(|date| date.format("%Y-%m-%d").to_string());
    format!(
        "{}\t{}\t{}\t{}\t{}",
        sale.id,
        sale.customer_name,
        or_dash(date.as_deref()),
        money(sale.total),
        sale.payment_method.label(),
    )
}

fn sale_detail(sale: &Sale) -> String {
    let mut text = vec![
        format!("#{} {}", sale.id, sale.customer_name),
        format!("email:   {}", or_dash(sale.customer_email.as_deref())),
        format!("phone:   {}", or_dash(sale.customer_phone.as_deref())),
        format!("payment: {}", sale.payment_method.label()),
        format!("total:   {}", money(sale.total)),
    ];
    text.extend(sale.items.iter().flatten().map(line_row));
    text.join("\n")
}

fn line_row(line: &OrderLine) -> String {
    let name = line.product.as_ref().map(|product| product.name.clone());
    let subtotal =
        if line.subtotal > 0.0 { line.subtotal } else { line.quantity as f64 * line.unit_price };
    format!(
        "  {} x {}\t@ {}\t= {}",
        line.quantity,
        name.unwrap_or_else(|| format!("product #{}", line.product_id)),
        money(line.unit_price),
        money(subtotal),
    )
}
