//! Application context - dependency injection container

use std::sync::Arc;

use partsdesk_core::session::{SessionContext, SessionGate, SessionStore};
use partsdesk_domain::{Config, PartsDeskError, Result};
use partsdesk_infra::api::{
    ApiClient, AuthService, HttpCredentialProbe, ProductService, QuoteService, SaleService,
    SupplierService, UserService,
};
use partsdesk_infra::session::open_store;
use tracing::debug;

const PRODUCTS: &str = "products";
const SUPPLIERS: &str = "suppliers";
const QUOTES: &str = "quotes";
const SALES: &str = "sales";
const USERS: &str = "user";

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub session: SessionContext,
    pub client: Arc<ApiClient>,
    pub gate: SessionGate,

    pub auth: AuthService,
    pub products: ProductService,
    pub suppliers: SupplierService,
    pub quotes: QuoteService,
    pub sales: SaleService,
    pub users: UserService,
}

impl AppContext {
    /// Wire everything using the session backend named in `config`.
    ///
    /// # Errors
    /// Returns `PartsDeskError::Config` if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let store = open_store(&config.session);
        Self::with_store(config, store)
    }

    /// Wire everything around an explicit session store.
    ///
    /// # Errors
    /// Returns `PartsDeskError::Config` if the HTTP client cannot be built.
    pub fn with_store(config: Config, store: Arc<dyn SessionStore>) -> Result<Self> {
        let session = SessionContext::new(store);
        let client =
            Arc::new(ApiClient::new(&config.api, session.clone()).map_err(PartsDeskError::from)?);
        let probe = Arc::new(HttpCredentialProbe::new(Arc::clone(&client)));
        let gate = SessionGate::new(session.clone(), probe);

        debug!(
            base_url = %config.api.base_url,
            session_backend = %config.session.backend,
            "application context ready"
        );

        Ok(Self {
            auth: AuthService::new(Arc::clone(&client)),
            products: ProductService::new(Arc::clone(&client), PRODUCTS),
            suppliers: SupplierService::new(Arc::clone(&client), SUPPLIERS),
            quotes: QuoteService::new(Arc::clone(&client), QUOTES),
            sales: SaleService::new(Arc::clone(&client), SALES),
            users: UserService::new(Arc::clone(&client), USERS),
            config,
            session,
            client,
            gate,
        })
    }
}
