//! Quotes and sales

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DeserializeFromStr, DisplayFromStr, PickFirst, SerializeDisplay};

use super::catalog::Product;
use super::wire::{lenient_datetime, WireValue};
use crate::impl_wire_enum_conversions;

/// Lifecycle of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub enum QuoteStatus {
    Pending,
    Sent,
    Accepted,
    Rejected,
}

impl_wire_enum_conversions!(QuoteStatus {
    Pending => "PENDIENTE",
    Sent => "ENVIADA",
    Accepted => "ACEPTADA",
    Rejected => "RECHAZADA",
});

/// How a sale was paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Card,
    Credit,
}

impl_wire_enum_conversions!(PaymentMethod {
    Cash => "EFECTIVO",
    Transfer => "TRANSFERENCIA",
    Card => "TARJETA",
    Credit => "CREDITO",
});

impl PaymentMethod {
    /// Human label as shown in the sales listing.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::Transfer => "Transferencia",
            Self::Card => "Tarjeta",
            Self::Credit => "Crédito",
        }
    }
}

impl WireValue<PaymentMethod> {
    /// Known methods get their label; anything else shows as sent.
    pub fn label(&self) -> &str {
        match self {
            Self::Known(method) => method.label(),
            Self::Other(raw) => raw,
        }
    }
}

/// Line of a quote or a sale
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default)]
    pub id: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub subtotal: f64,
    #[serde(rename = "productId")]
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

/// Customer quote
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "clienteNombre")]
    pub customer_name: String,
    #[serde(rename = "clienteEmail", default)]
    pub customer_email: String,
    #[serde(
        rename = "fecha",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WireValue<QuoteStatus>>,
    #[serde(rename = "usuarioId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderLine>>,
}

/// Completed sale
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    #[serde(
        rename = "fecha",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "metodoPago", default)]
    pub payment_method: WireValue<PaymentMethod>,
    #[serde(rename = "clienteNombre")]
    pub customer_name: String,
    #[serde(rename = "clienteEmail", default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(rename = "clienteTelefono", default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(rename = "cotizacionId", default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<i64>,
    #[serde(rename = "usuarioId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderLine>>,
}

/// Line sent when creating a quote or a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    #[serde(rename = "productId")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
}

/// Body for `POST /quotes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(rename = "clienteNombre")]
    pub customer_name: String,
    #[serde(rename = "clienteEmail")]
    pub customer_email: String,
    pub items: Vec<OrderLineRequest>,
}

/// Body for `POST /sales`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSaleRequest {
    #[serde(rename = "clienteNombre")]
    pub customer_name: String,
    #[serde(rename = "clienteEmail", skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(rename = "clienteTelefono", skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(rename = "metodoPago")]
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderLineRequest>,
}
