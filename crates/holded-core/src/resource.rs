//! Generic resource tiers.
//!
//! Most Holded endpoints follow the same path convention:
//!
//! ```text
//! GET    /<area>/v1/<resource>        list
//! GET    /<area>/v1/<resource>/:id    get
//! POST   /<area>/v1/<resource>        create
//! PUT    /<area>/v1/<resource>/:id    update
//! DELETE /<area>/v1/<resource>/:id    delete
//! ```
//!
//! The three tiers here are distinct types, not a hierarchy: a tier is a
//! named set of operations. Domain crates compose a tier with extra
//! endpoints that delegate to the transport directly.

use crate::error::Result;
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Pagination parameters supported by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: Option<u32>,
    /// Items per page
    pub limit: Option<u32>,
}

impl ListParams {
    /// Create empty parameters (no pagination).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: None,
            limit: None,
        }
    }

    /// Request a specific page.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Limit the number of items per page.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Convert to query pairs, omitting absent values entirely.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }
}

/// Full resource tier: list, get, create, update, delete.
pub struct CrudResource<T> {
    transport: Transport,
    base_path: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for CrudResource<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            base_path: self.base_path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> CrudResource<T>
where
    T: DeserializeOwned,
{
    /// Create a resource client for the given base path.
    #[must_use]
    pub fn new(transport: Transport, base_path: impl Into<String>) -> Self {
        Self {
            transport,
            base_path: base_path.into(),
            _entity: PhantomData,
        }
    }

    /// Return the resource base path.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Access the underlying transport, for domain-specific extensions.
    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// List entities with optional pagination.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<T>> {
        self.transport.get(&self.base_path, &params.to_pairs()).await
    }

    /// Fetch a single entity by identifier.
    pub async fn get(&self, id: &str) -> Result<T> {
        self.transport
            .get(&format!("{}/{id}", self.base_path), &[])
            .await
    }

    /// Create a new entity from an open JSON record.
    pub async fn create(&self, data: &Value) -> Result<T> {
        self.transport.post(&self.base_path, Some(data)).await
    }

    /// Update an existing entity.
    pub async fn update(&self, id: &str, data: &Value) -> Result<T> {
        self.transport
            .put(&format!("{}/{id}", self.base_path), data)
            .await
    }

    /// Delete an entity. The remote response shape varies per resource.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.transport
            .delete(&format!("{}/{id}", self.base_path))
            .await
    }
}

/// Read-only tier: list and get.
pub struct ReadOnlyResource<T> {
    transport: Transport,
    base_path: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for ReadOnlyResource<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            base_path: self.base_path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> ReadOnlyResource<T>
where
    T: DeserializeOwned,
{
    /// Create a read-only resource client for the given base path.
    #[must_use]
    pub fn new(transport: Transport, base_path: impl Into<String>) -> Self {
        Self {
            transport,
            base_path: base_path.into(),
            _entity: PhantomData,
        }
    }

    /// List entities with optional pagination.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<T>> {
        self.transport.get(&self.base_path, &params.to_pairs()).await
    }

    /// Fetch a single entity by identifier.
    pub async fn get(&self, id: &str) -> Result<T> {
        self.transport
            .get(&format!("{}/{id}", self.base_path), &[])
            .await
    }
}

/// List-only tier: no individual get.
pub struct ListOnlyResource<T> {
    transport: Transport,
    base_path: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for ListOnlyResource<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            base_path: self.base_path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> ListOnlyResource<T>
where
    T: DeserializeOwned,
{
    /// Create a list-only resource client for the given base path.
    #[must_use]
    pub fn new(transport: Transport, base_path: impl Into<String>) -> Self {
        Self {
            transport,
            base_path: base_path.into(),
            _entity: PhantomData,
        }
    }

    /// List entities with optional pagination.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<T>> {
        self.transport.get(&self.base_path, &params.to_pairs()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_transport(server: &MockServer) -> Transport {
        let config = GatewayConfig::with_base_url("test-key", server.uri())
            .unwrap()
            .with_retry_base_delay_ms(5);
        Transport::new(&config).unwrap()
    }

    #[test]
    fn list_params_omit_absent_values() {
        assert!(ListParams::new().to_pairs().is_empty());
        assert_eq!(
            ListParams::new().with_page(3).to_pairs(),
            vec![("page", "3".to_string())]
        );
        assert_eq!(
            ListParams::new().with_page(1).with_limit(25).to_pairs(),
            vec![("page", "1".to_string()), ("limit", "25".to_string())]
        );
    }

    #[tokio::test]
    async fn list_forwards_pagination_only_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/invoicing/v1/services"))
            .and(query_param_is_missing("page"))
            .and(query_param_is_missing("limit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let resource: ListOnlyResource<Value> =
            ListOnlyResource::new(test_transport(&server), "/invoicing/v1/services");
        let items = resource.list(&ListParams::new()).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn list_forwards_pagination_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/invoicing/v1/contacts"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "c1"}])))
            .mount(&server)
            .await;

        let resource: CrudResource<Value> =
            CrudResource::new(test_transport(&server), "/invoicing/v1/contacts");
        let items = resource
            .list(&ListParams::new().with_page(2).with_limit(10))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn get_appends_identifier_to_base_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/invoicing/v1/contacts/c42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c42"})))
            .mount(&server)
            .await;

        let resource: ReadOnlyResource<Value> =
            ReadOnlyResource::new(test_transport(&server), "/invoicing/v1/contacts");
        let entity = resource.get("c42").await.unwrap();
        assert_eq!(entity["id"], "c42");
    }

    #[tokio::test]
    async fn create_and_update_send_json_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoicing/v1/contacts"))
            .and(body_json(json!({"name": "Acme"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1"})))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/invoicing/v1/contacts/c1"))
            .and(body_json(json!({"name": "Acme Ltd"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1"})))
            .mount(&server)
            .await;

        let resource: CrudResource<Value> =
            CrudResource::new(test_transport(&server), "/invoicing/v1/contacts");
        resource.create(&json!({"name": "Acme"})).await.unwrap();
        resource
            .update("c1", &json!({"name": "Acme Ltd"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_returns_raw_value() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/invoicing/v1/contacts/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 1})))
            .mount(&server)
            .await;

        let resource: CrudResource<Value> =
            CrudResource::new(test_transport(&server), "/invoicing/v1/contacts");
        let result = resource.delete("c1").await.unwrap();
        assert_eq!(result["status"], 1);
    }
}
