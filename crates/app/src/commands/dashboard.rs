use partsdesk_core::DashboardStats;
use partsdesk_infra::api::ApiError;

use super::guarded;
use crate::context::AppContext;
use crate::utils::output::{Exit, Output};

/// Fetch the three listings concurrently and count them.
pub(super) async fn show(ctx: &AppContext, out: Output) -> Exit {
    let work = || async {
        let (products, sales, quotes) =
            tokio::try_join!(ctx.products.listing(), ctx.sales.listing(), ctx.quotes.listing())?;
        Ok::<_, ApiError>(DashboardStats::compute(&products, &sales, &quotes))
    };

    guarded(ctx, out, "dashboard", work, |stats| {
        format!(
            "Products:   {}\nSales:      {}\nQuotes:     {}\nLow stock:  {}",
            stats.products, stats.sales, stats.quotes, stats.low_stock
        )
    })
    .await
}
