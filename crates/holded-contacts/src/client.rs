//! Contacts client: full CRUD tier plus attachment endpoints.

use crate::models::{Contact, ContactAttachment, ContactGroup};
use holded_core::resource::{CrudResource, ListParams};
use holded_core::{Result, Transport};
use serde_json::Value;

const BASE_PATH: &str = "/invoicing/v1/contacts";
const GROUPS_PATH: &str = "/invoicing/v1/contactgroups";

/// Asynchronous client for contacts.
#[derive(Clone)]
pub struct ContactsClient {
    inner: CrudResource<Contact>,
}

impl ContactsClient {
    /// Create a contacts client on top of the given transport.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self {
            inner: CrudResource::new(transport, BASE_PATH),
        }
    }

    /// List contacts with optional pagination.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Contact>> {
        self.inner.list(params).await
    }

    /// Fetch a single contact.
    pub async fn get(&self, id: &str) -> Result<Contact> {
        self.inner.get(id).await
    }

    /// Create a contact from an open JSON record.
    pub async fn create(&self, data: &Value) -> Result<Contact> {
        self.inner.create(data).await
    }

    /// Update a contact.
    pub async fn update(&self, id: &str, data: &Value) -> Result<Contact> {
        self.inner.update(id, data).await
    }

    /// Delete a contact.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.inner.delete(id).await
    }

    /// List the files attached to a contact.
    pub async fn list_attachments(&self, contact_id: &str) -> Result<Vec<ContactAttachment>> {
        self.inner
            .transport()
            .get(&format!("{BASE_PATH}/{contact_id}/attachments"), &[])
            .await
    }

    /// Fetch a single attachment of a contact.
    pub async fn get_attachment(
        &self,
        contact_id: &str,
        attachment_id: &str,
    ) -> Result<ContactAttachment> {
        self.inner
            .transport()
            .get(
                &format!("{BASE_PATH}/{contact_id}/attachments/{attachment_id}"),
                &[],
            )
            .await
    }

    /// Contact groups (full CRUD tier).
    #[must_use]
    pub fn groups(&self) -> CrudResource<ContactGroup> {
        CrudResource::new(self.inner.transport().clone(), GROUPS_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holded_core::GatewayConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ContactsClient {
        let config = GatewayConfig::with_base_url("test-key", server.uri())
            .unwrap()
            .with_retry_base_delay_ms(5);
        ContactsClient::new(Transport::new(&config).unwrap())
    }

    #[tokio::test]
    async fn list_with_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/invoicing/v1/contacts"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "c1", "name": "Acme", "type": "client"}
            ])))
            .mount(&server)
            .await;

        let contacts = test_client(&server)
            .list(&ListParams::new().with_limit(5))
            .await
            .unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].kind.as_deref(), Some("client"));
    }

    #[tokio::test]
    async fn attachments_use_suffix_segments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/invoicing/v1/contacts/c1/attachments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "a1", "name": "contract.pdf"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/invoicing/v1/contacts/c1/attachments/a1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "a1", "name": "contract.pdf"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let attachments = client.list_attachments("c1").await.unwrap();
        assert_eq!(attachments.len(), 1);

        let attachment = client.get_attachment("c1", "a1").await.unwrap();
        assert_eq!(attachment.name, "contract.pdf");
    }

    #[tokio::test]
    async fn groups_compose_the_crud_tier() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/invoicing/v1/contactgroups/g1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "g1", "name": "VIP"})),
            )
            .mount(&server)
            .await;

        let group = test_client(&server).groups().get("g1").await.unwrap();
        assert_eq!(group.name, "VIP");
    }
}
