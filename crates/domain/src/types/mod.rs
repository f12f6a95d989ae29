//! Warehouse entities as the backend serializes them
//!
//! The backend speaks Spanish camelCase (`nombre`, `precioUnitario`, ...).
//! Rust fields use English names and serde renames keep the wire format.

pub mod auth;
pub mod catalog;
pub mod orders;
pub mod user;
pub mod wire;

pub use auth::{AuthPayload, AuthResponse, LoginRequest, RegisterRequest};
pub use catalog::{Product, ProductInput, Supplier, SupplierInput};
pub use orders::{
    CreateQuoteRequest, CreateSaleRequest, OrderLine, OrderLineRequest, PaymentMethod, Quote,
    QuoteStatus, Sale,
};
pub use user::{User, UserPageQuery, UserRole, UserStatusUpdate};
pub use wire::WireValue;

pub(crate) const fn default_true() -> bool {
    true
}
