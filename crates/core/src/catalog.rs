//! Name search across listings

use partsdesk_domain::{Product, Quote, Supplier, User};

/// Something listable by a display name
pub trait Named {
    fn display_name(&self) -> &str;
}

impl Named for Product {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Named for Supplier {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Named for User {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Named for Quote {
    fn display_name(&self) -> &str {
        &self.customer_name
    }
}

/// Case-insensitive substring match on [`Named::display_name`].
///
/// A blank query matches everything.
pub fn filter_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }

    items.iter().filter(|item| item.display_name().to_lowercase().contains(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(id: i64, name: &str) -> Supplier {
        Supplier { id, name: name.into(), phone: None, email: None, address: None, active: true }
    }

    #[test]
    fn matches_ignoring_case() {
        let suppliers = vec![supplier(1, "Bosch México"), supplier(2, "Gonher"), supplier(3, "BOSCH")];
        let found: Vec<i64> = filter_by_name(&suppliers, "bosch").iter().map(|s| s.id).collect();
        assert_eq!(found, vec![1, 3]);
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let suppliers = vec![supplier(2, "b"), supplier(1, "a")];
        let found: Vec<i64> = filter_by_name(&suppliers, "  ").iter().map(|s| s.id).collect();
        assert_eq!(found, vec![2, 1]);
    }
}
