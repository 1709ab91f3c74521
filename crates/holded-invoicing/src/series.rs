//! Numbering series client.
//!
//! Unlike the generic tiers, listing is scoped by document type (the type
//! is a path segment, not a query parameter), so this client is bespoke.

use crate::models::{DocType, NumberingSeries};
use holded_core::{Result, Transport};
use serde_json::Value;

const BASE_PATH: &str = "/invoicing/v1/numberingseries";

/// Asynchronous client for document numbering series.
#[derive(Clone)]
pub struct NumberingSeriesClient {
    transport: Transport,
}

impl NumberingSeriesClient {
    /// Create a numbering series client on top of the given transport.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// List the numbering series configured for a document type.
    pub async fn list(&self, doc_type: DocType) -> Result<Vec<NumberingSeries>> {
        self.transport
            .get(&format!("{BASE_PATH}/{doc_type}"), &[])
            .await
    }

    /// Create a numbering series.
    pub async fn create(&self, data: &Value) -> Result<NumberingSeries> {
        self.transport.post(BASE_PATH, Some(data)).await
    }

    /// Update a numbering series.
    pub async fn update(&self, id: &str, data: &Value) -> Result<NumberingSeries> {
        self.transport.put(&format!("{BASE_PATH}/{id}"), data).await
    }

    /// Delete a numbering series.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.transport.delete(&format!("{BASE_PATH}/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holded_core::GatewayConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_scopes_by_doc_type_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/invoicing/v1/numberingseries/invoice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "s1", "name": "Default", "prefix": "F"}
            ])))
            .mount(&server)
            .await;

        let config = GatewayConfig::with_base_url("test-key", server.uri()).unwrap();
        let client = NumberingSeriesClient::new(Transport::new(&config).unwrap());
        let series = client.list(DocType::Invoice).await.unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].prefix.as_deref(), Some("F"));
    }
}
