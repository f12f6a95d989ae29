//! Dashboard summary statistics

use partsdesk_domain::constants::LOW_STOCK_THRESHOLD;
use partsdesk_domain::{Product, Quote, Sale};
use serde::{Deserialize, Serialize};

use crate::envelope::Listing;

/// Headline counters shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub products: usize,
    pub sales: usize,
    pub quotes: usize,
    /// Products with stock below [`LOW_STOCK_THRESHOLD`]
    pub low_stock: usize,
}

impl DashboardStats {
    /// Totals are what the backend sent, including rows that did not decode.
    /// Low stock can only be judged on decoded products.
    pub fn compute(
        products: &Listing<Product>,
        sales: &Listing<Sale>,
        quotes: &Listing<Quote>,
    ) -> Self {
        Self {
            products: products.received,
            sales: sales.received,
            quotes: quotes.received,
            low_stock: products.items.iter().filter(|product| is_low_stock(product)).count(),
        }
    }
}

pub fn is_low_stock(product: &Product) -> bool {
    product.stock < LOW_STOCK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, stock: i64) -> Product {
        Product {
            id,
            name: format!("part-{id}"),
            description: None,
            price: 10.0,
            stock,
            category: None,
            active: true,
            supplier_id: None,
            supplier: None,
        }
    }

    fn listing<T>(items: Vec<T>) -> Listing<T> {
        let received = items.len();
        Listing { items, received }
    }

    #[test]
    fn counts_low_stock_strictly_below_threshold() {
        let products = listing(vec![product(1, 0), product(2, 9), product(3, 10), product(4, 250)]);
        let stats = DashboardStats::compute(&products, &listing(vec![]), &listing(vec![]));

        assert_eq!(stats.products, 4);
        assert_eq!(stats.low_stock, 2);
        assert_eq!(stats.sales, 0);
    }

    #[test]
    fn undecodable_rows_still_count() {
        let quotes = Listing { items: Vec::new(), received: 3 };
        let stats = DashboardStats::compute(&listing(vec![product(1, 50)]), &listing(vec![]), &quotes);

        assert_eq!(stats.quotes, 3);
        assert_eq!(stats.products, 1);
    }

    #[test]
    fn empty_lists_give_zeroes() {
        let stats = DashboardStats::compute(&listing(vec![]), &listing(vec![]), &listing(vec![]));
        assert_eq!(stats, DashboardStats::default());
    }
}
