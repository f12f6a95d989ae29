//! Quote and sale drafts
//!
//! A draft collects lines picked from the product catalog, keeps a running
//! total and turns into the create-request body once the required fields
//! are filled in. Unit prices are copied from the product at the moment the
//! line is added.

use partsdesk_domain::{
    CreateQuoteRequest, CreateSaleRequest, OrderLineRequest, PartsDeskError, PaymentMethod,
    Product, Result,
};
use serde::{Deserialize, Serialize};

/// Line in a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl DraftLine {
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    fn to_request(&self) -> OrderLineRequest {
        OrderLineRequest {
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

/// Ordered lines shared by both draft kinds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftLines {
    lines: Vec<DraftLine>,
}

impl DraftLines {
    /// Append `quantity` units of `product` at its current price.
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<()> {
        if quantity < 1 {
            return Err(PartsDeskError::InvalidInput(format!(
                "quantity for '{}' must be at least 1",
                product.name
            )));
        }
        self.lines.push(DraftLine {
            product_id: product.id,
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
        });
        Ok(())
    }

    /// Remove the line at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<DraftLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(DraftLine::subtotal).sum()
    }

    fn to_requests(&self) -> Result<Vec<OrderLineRequest>> {
        if self.lines.is_empty() {
            return Err(PartsDeskError::InvalidInput("add at least one product".into()));
        }
        Ok(self.lines.iter().map(DraftLine::to_request).collect())
    }
}

/// Quote being assembled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub lines: DraftLines,
}

impl QuoteDraft {
    pub fn new(customer_name: impl Into<String>, customer_email: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            lines: DraftLines::default(),
        }
    }

    pub fn total(&self) -> f64 {
        self.lines.total()
    }

    /// Validate and build the `POST /quotes` body.
    pub fn to_request(&self) -> Result<CreateQuoteRequest> {
        let customer_name = required(&self.customer_name, "customer name")?;
        let customer_email = required(&self.customer_email, "customer email")?;
        if !customer_email.contains('@') {
            return Err(PartsDeskError::InvalidInput("customer email is not valid".into()));
        }

        Ok(CreateQuoteRequest {
            customer_name,
            customer_email,
            items: self.lines.to_requests()?,
        })
    }
}

/// Sale being assembled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub payment_method: PaymentMethod,
    pub lines: DraftLines,
}

impl SaleDraft {
    pub fn new(customer_name: impl Into<String>, payment_method: PaymentMethod) -> Self {
        Self { customer_name: customer_name.into(), payment_method, ..Self::default() }
    }

    pub fn total(&self) -> f64 {
        self.lines.total()
    }

    /// Validate and build the `POST /sales` body. Blank contact fields are
    /// left out of the payload.
    pub fn to_request(&self) -> Result<CreateSaleRequest> {
        Ok(CreateSaleRequest {
            customer_name: required(&self.customer_name, "customer name")?,
            customer_email: optional(self.customer_email.as_deref()),
            customer_phone: optional(self.customer_phone.as_deref()),
            payment_method: self.payment_method,
            items: self.lines.to_requests()?,
        })
    }
}

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PartsDeskError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            name: format!("part-{id}"),
            description: None,
            price,
            stock: 5,
            category: None,
            active: true,
            supplier_id: None,
            supplier: None,
        }
    }

    #[test]
    fn quote_total_and_request() {
        let mut draft = QuoteDraft::new("Taller Ruiz", "ruiz@example.com");
        draft.lines.add(&product(1, 100.0), 2).unwrap();
        draft.lines.add(&product(2, 12.5), 4).unwrap();

        assert_eq!(draft.total(), 250.0);
        let request = draft.to_request().unwrap();
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[1].unit_price, 12.5);
        assert_eq!(request.items[1].quantity, 4);
    }

    #[test]
    fn removing_lines_updates_total() {
        let mut draft = QuoteDraft::new("Cliente", "c@example.com");
        draft.lines.add(&product(1, 10.0), 1).unwrap();
        draft.lines.add(&product(2, 20.0), 1).unwrap();

        let removed = draft.lines.remove(0).unwrap();
        assert_eq!(removed.product_id, 1);
        assert!(draft.lines.remove(5).is_none());
        assert_eq!(draft.total(), 20.0);
    }

    #[test]
    fn quote_requires_customer_and_lines() {
        let empty = QuoteDraft::new("Cliente", "c@example.com");
        assert!(empty.to_request().is_err());

        let mut no_email = QuoteDraft::new("Cliente", "  ");
        no_email.lines.add(&product(1, 1.0), 1).unwrap();
        assert!(no_email.to_request().is_err());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut lines = DraftLines::default();
        assert!(lines.add(&product(1, 1.0), 0).is_err());
        assert!(lines.lines().is_empty());
    }

    #[test]
    fn sale_drops_blank_contact_fields() {
        let mut draft = SaleDraft::new("Mostrador", PaymentMethod::Transfer);
        draft.customer_email = Some("   ".into());
        draft.customer_phone = Some("555-0101".into());
        draft.lines.add(&product(9, 80.0), 3).unwrap();

        let request = draft.to_request().unwrap();
        assert_eq!(request.customer_email, None);
        assert_eq!(request.customer_phone.as_deref(), Some("555-0101"));
        assert_eq!(request.payment_method, PaymentMethod::Transfer);
        assert_eq!(draft.total(), 240.0);
    }
}
