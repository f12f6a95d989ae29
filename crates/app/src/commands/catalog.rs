//! products and suppliers

use partsdesk_core::dashboard::is_low_stock;
use partsdesk_core::filter_by_name;
use partsdesk_domain::{Product, ProductInput, Supplier, SupplierInput};
use partsdesk_infra::api::ApiError;
use serde_json::Value;

use super::{guarded, money, or_dash};
use crate::cli::{ProductCommands, SupplierCommands};
use crate::context::AppContext;
use crate::utils::output::{rows, Exit, Output};

pub(super) async fn products(ctx: &AppContext, command: ProductCommands, out: Output) -> Exit {
    match command {
        ProductCommands::List { search, low_stock } => {
            let work = || async {
                let products = ctx.products.list().await?;
                let matched = filter_by_name(&products, search.as_deref().unwrap_or_default());
                Ok::<_, ApiError>(
                    matched
                        .into_iter()
                        .filter(|product| !low_stock || is_low_stock(product))
                        .cloned()
                        .collect::<Vec<_>>(),
                )
            };
            guarded(ctx, out, "products.list", work, |products| rows(products, product_row)).await
        }
        ProductCommands::Show { id } => {
            guarded(ctx, out, "products.show", || ctx.products.get(id), product_detail).await
        }
        ProductCommands::Create(fields) => {
            let input = ProductInput::from(fields);
            let work = || async {
                if input.name.as_deref().map_or(true, |name| name.trim().is_empty()) {
                    return Err(ApiError::Client("--name is required".into()));
                }
                ctx.products.create(&input).await
            };
            guarded(ctx, out, "products.create", work, |product| {
                format!("Created product {} ({})", product.id, product.name)
            })
            .await
        }
        ProductCommands::Update { id, fields } => {
            let input = ProductInput::from(fields);
            let work = || async {
                if input == ProductInput::default() {
                    return Err(ApiError::Client("nothing to update".into()));
                }
                ctx.products.update(id, &input).await
            };
            guarded(ctx, out, "products.update", work, product_detail).await
        }
        ProductCommands::Delete { id } => {
            let work = || async { ctx.products.delete(id).await.map(|()| Value::Null) };
            guarded(ctx, out, "products.delete", work, |_| format!("Deleted product {id}")).await
        }
    }
}

pub(super) async fn suppliers(ctx: &AppContext, command: SupplierCommands, out: Output) -> Exit {
    match command {
        SupplierCommands::List { search } => {
            let work = || async {
                let suppliers = ctx.suppliers.list().await?;
                let matched = filter_by_name(&suppliers, search.as_deref().unwrap_or_default());
                Ok::<_, ApiError>(matched.into_iter().cloned().collect::<Vec<_>>())
            };
            guarded(ctx, out, "suppliers.list", work, |suppliers| rows(suppliers, supplier_row))
                .await
        }
        SupplierCommands::Show { id } => {
            guarded(ctx, out, "suppliers.show", || ctx.suppliers.get(id), supplier_row).await
        }
        SupplierCommands::Create(fields) => {
            let input = SupplierInput::from(fields);
            let work = || async {
                if input.name.as_deref().map_or(true, |name| name.trim().is_empty()) {
                    return Err(ApiError::Client("--name is required".into()));
                }
                ctx.suppliers.create(&input).await
            };
            guarded(ctx, out, "suppliers.create", work, |supplier| {
                format!("Created supplier {} ({})", supplier.id, supplier.name)
            })
            .await
        }
        SupplierCommands::Update { id, fields } => {
            let input = SupplierInput::from(fields);
            let work = || async {
                if input == SupplierInput::default() {
                    return Err(ApiError::Client("nothing to update".into()));
                }
                ctx.suppliers.update(id, &input).await
            };
            guarded(ctx, out, "suppliers.update", work, supplier_row).await
        }
        SupplierCommands::Delete { id } => {
            let work = || async { ctx.suppliers.delete(id).await.map(|()| Value::Null) };
            guarded(ctx, out, "suppliers.delete", work, |_| format!("Deleted supplier {id}")).await
        }
    }
}

fn product_row(product: &Product) -> String {
    let flag = if is_low_stock(product) { " LOW" } else { "" };
    format!(
        "{}\t{}\t{}\t{}{flag}\t{}",
        product.id,
        product.name,
        money(product.price),
        product.stock,
        or_dash(product.category.as_deref()),
    )
}

fn product_detail(product: &Product) -> String {
    let supplier = product
        .supplier
        .as_ref()
        .map(|supplier| supplier.name.clone())
        .or_else(|| product.supplier_id.map(|id| format!("#{id}")));
    [
        format!("#{} {}", product.id, product.name),
        format!("price:       {}", money(product.price)),
        format!("stock:       {}", product.stock),
        format!("category:    {}", or_dash(product.category.as_deref())),
        format!("supplier:    {}", or_dash(supplier.as_deref())),
        format!("description: {}", or_dash(product.description.as_deref())),
    ]
    .join("\n")
}

fn supplier_row(supplier: &Supplier) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        supplier.id,
        supplier.name,
        or_dash(supplier.phone.as_deref()),
        or_dash(supplier.email.as_deref()),
    )
}
