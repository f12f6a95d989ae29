//! PartsDesk backend API
//!
//! - [`ApiClient`]: base URL, bearer signing from the session, timeouts
//! - [`AuthService`]: login / register / logout
//! - [`ResourceService`]: products, suppliers, quotes, sales, users
//! - [`HttpCredentialProbe`]: credential check used by the session gate

pub mod auth;
pub mod client;
pub mod errors;
pub mod probe;
pub mod resources;

pub use auth::AuthService;
pub use client::{ApiClient, ApiClientBuilder};
pub use errors::{ApiError, ApiErrorCategory};
pub use probe::HttpCredentialProbe;
pub use resources::{
    ProductService, QuoteService, ResourceService, SaleService, SupplierService, UserService,
};
