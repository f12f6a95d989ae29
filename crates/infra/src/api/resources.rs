//! CRUD services for the backend's REST resources
//!
//! Listing endpoints are read through the envelope normalizer, so the
//! services return plain vectors whatever wrapper the backend used.

use std::marker::PhantomData;
use std::sync::Arc;

use partsdesk_core::envelope::{extract_entities, extract_listing, Listing};
use partsdesk_domain::{Product, Quote, Sale, Supplier, User, UserPageQuery, UserStatusUpdate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::errors::ApiError;

pub type ProductService = ResourceService<Product>;
pub type SupplierService = ResourceService<Supplier>;
pub type QuoteService = ResourceService<Quote>;
pub type SaleService = ResourceService<Sale>;
pub type UserService = ResourceService<User>;

/// Service for one REST collection, e.g. `/products`
pub struct ResourceService<T> {
    client: Arc<ApiClient>,
    resource: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self { client: Arc::clone(&self.client), resource: self.resource, _entity: PhantomData }
    }
}

impl<T: DeserializeOwned> ResourceService<T> {
    pub fn new(client: Arc<ApiClient>, resource: &'static str) -> Self {
        Self { client, resource, _entity: PhantomData }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        Ok(self.listing().await?.items)
    }

    /// Like [`Self::list`], keeping the count of rows the backend sent.
    #[instrument(skip(self), fields(resource = self.resource))]
    pub async fn listing(&self) -> Result<Listing<T>, ApiError> {
        let body: Value = self.client.get(&self.collection_path()).await?;
        let listing = extract_listing(Some(&body));
        debug!(count = listing.items.len(), received = listing.received, "listed");
        Ok(listing)
    }

    #[instrument(skip(self), fields(resource = self.resource))]
    pub async fn get(&self, id: i64) -> Result<T, ApiError> {
        let body: Value = self.client.get(&self.item_path(id)).await?;
        unwrap_entity(body)
    }

    #[instrument(skip(self, body), fields(resource = self.resource))]
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T, ApiError> {
        let created: Value = self.client.post(&self.collection_path(), body).await?;
        unwrap_entity(created)
    }

    /// Partial update (`PATCH`).
    #[instrument(skip(self, body), fields(resource = self.resource))]
    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, body: &B) -> Result<T, ApiError> {
        let updated: Value = self.client.patch(&self.item_path(id), body).await?;
        unwrap_entity(updated)
    }

    #[instrument(skip(self), fields(resource = self.resource))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&self.item_path(id)).await?;
        Ok(())
    }

    fn collection_path(&self) -> String {
        format!("/{}", self.resource)
    }

    fn item_path(&self, id: i64) -> String {
        format!("/{}/{id}", self.resource)
    }
}

impl ResourceService<Quote> {
    /// Ask the backend to email quote `id` to its customer.
    #[instrument(skip(self))]
    pub async fn send_email(&self, id: i64) -> Result<Option<String>, ApiError> {
        let body: Value =
            self.client.post(&format!("{}/send-email", self.item_path(id)), &Map::new()).await?;
        Ok(body.get("message").and_then(Value::as_str).map(str::to_string))
    }
}

impl ResourceService<User> {
    /// `GET /user/paginated`
    #[instrument(skip(self))]
    pub async fn paginated(&self, query: &UserPageQuery) -> Result<Vec<User>, ApiError> {
        let path = format!("{}/paginated", self.collection_path());
        let body: Value = self.client.get_with_query(&path, query).await?;
        Ok(extract_entities(Some(&body)))
    }

    /// Activate or deactivate an account.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: i64, status: bool) -> Result<(), ApiError> {
        let path = format!("{}/status", self.item_path(id));
        let _: Value = self.client.patch(&path, &UserStatusUpdate { status }).await?;
        Ok(())
    }
}

/// Single-entity responses arrive bare or as `{ data: {...} }`.
fn unwrap_entity<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let entity = match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(entity).map_err(|e| ApiError::Decode(format!("unexpected entity: {e}")))
}
