//! Documents client: CRUD, sub-actions and duplication.

use crate::duplicate::{apply_approval_gate, build_duplicate_payload};
use crate::models::{DocType, Document};
use holded_core::resource::ListParams;
use holded_core::{Result, Transport};
use serde_json::{Map, Value};
use tracing::warn;

const BASE_PATH: &str = "/invoicing/v1/documents";

const SECONDS_PER_DAY: i64 = 86_400;

/// Options for duplicating a document.
#[derive(Debug, Clone, Default)]
pub struct DuplicateOptions {
    /// New document date as Unix seconds (UTC). Defaults to the start of
    /// the current UTC day.
    pub date: Option<i64>,

    /// Extra fields merged into the payload after remapping; override keys
    /// win on collision.
    pub overrides: Option<Map<String, Value>>,

    /// Approve the new document immediately. IRREVERSIBLE: an approved
    /// document can no longer be edited or deleted. Defaults to `false`,
    /// creating a draft.
    pub approve: bool,
}

impl DuplicateOptions {
    /// Create default options (today's date, no overrides, draft).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new document date (Unix seconds, UTC).
    #[must_use]
    pub const fn with_date(mut self, date_ts: i64) -> Self {
        self.date = Some(date_ts);
        self
    }

    /// Merge extra fields into the creation payload.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Map<String, Value>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Approve the new document immediately (irreversible).
    #[must_use]
    pub const fn approve(mut self, approve: bool) -> Self {
        self.approve = approve;
        self
    }
}

/// Asynchronous client for invoicing documents.
#[derive(Clone)]
pub struct DocumentsClient {
    transport: Transport,
}

impl DocumentsClient {
    /// Create a documents client on top of the given transport.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn collection_path(doc_type: DocType) -> String {
        format!("{BASE_PATH}/{doc_type}")
    }

    fn item_path(doc_type: DocType, id: &str) -> String {
        format!("{BASE_PATH}/{doc_type}/{id}")
    }

    /// List documents of a type with optional pagination.
    pub async fn list(&self, doc_type: DocType, params: &ListParams) -> Result<Vec<Document>> {
        self.transport
            .get(&Self::collection_path(doc_type), &params.to_pairs())
            .await
    }

    /// Fetch a single document.
    pub async fn get(&self, doc_type: DocType, id: &str) -> Result<Document> {
        self.transport
            .get(&Self::item_path(doc_type, id), &[])
            .await
    }

    /// Create a document from an open JSON record (write shape).
    pub async fn create(&self, doc_type: DocType, data: &Value) -> Result<Document> {
        self.transport
            .post(&Self::collection_path(doc_type), Some(data))
            .await
    }

    /// Update a document.
    pub async fn update(&self, doc_type: DocType, id: &str, data: &Value) -> Result<Document> {
        self.transport
            .put(&Self::item_path(doc_type, id), data)
            .await
    }

    /// Delete a document.
    pub async fn delete(&self, doc_type: DocType, id: &str) -> Result<Value> {
        self.transport.delete(&Self::item_path(doc_type, id)).await
    }

    /// Duplicate a document to a new date.
    ///
    /// Fetches the source, strips server-managed fields, remaps the
    /// read/write field-name asymmetries (`contact` to `contactId`,
    /// `products[].price` to `items[].subtotal`), applies the new date,
    /// merges any overrides, and creates the new document as a draft
    /// unless `options.approve` is explicitly `true`.
    ///
    /// The read and create are two independent remote calls; a concurrent
    /// edit of the source between them is reflected as a stale snapshot.
    pub async fn duplicate(
        &self,
        doc_type: DocType,
        id: &str,
        options: DuplicateOptions,
    ) -> Result<Document> {
        let source: Map<String, Value> = self
            .transport
            .get(&Self::item_path(doc_type, id), &[])
            .await?;

        let date_ts = options.date.unwrap_or_else(start_of_current_utc_day);
        let mut payload = build_duplicate_payload(&source, date_ts, options.overrides.as_ref());

        // The single library-level flag expresses both intents; the CLI
        // keeps --approve and --confirm separate and folds them before
        // calling through.
        if let Some(warning) = apply_approval_gate(&mut payload, options.approve, options.approve) {
            warn!(%doc_type, id, "{warning}");
        }

        self.transport
            .post(&Self::collection_path(doc_type), Some(&Value::Object(payload)))
            .await
    }

    /// Download the rendered PDF for a document.
    pub async fn pdf(&self, doc_type: DocType, id: &str) -> Result<Vec<u8>> {
        self.transport
            .get_binary(&format!("{}/pdf", Self::item_path(doc_type, id)))
            .await
    }

    /// Register a payment against a document.
    pub async fn pay(&self, doc_type: DocType, id: &str, data: &Value) -> Result<Value> {
        self.transport
            .post(&format!("{}/pay", Self::item_path(doc_type, id)), Some(data))
            .await
    }

    /// Send a document by email.
    pub async fn send(&self, doc_type: DocType, id: &str, data: Option<&Value>) -> Result<Value> {
        self.transport
            .post(&format!("{}/send", Self::item_path(doc_type, id)), data)
            .await
    }

    /// Mark all units of a document as shipped.
    pub async fn ship_all(&self, doc_type: DocType, id: &str) -> Result<Value> {
        self.transport
            .post(&format!("{}/ship", Self::item_path(doc_type, id)), None)
            .await
    }

    /// Ship specific line items.
    pub async fn ship_by_line(&self, doc_type: DocType, id: &str, data: &Value) -> Result<Value> {
        self.transport
            .post(&format!("{}/ship", Self::item_path(doc_type, id)), Some(data))
            .await
    }

    /// Fetch the units already shipped for a document.
    pub async fn shipped_units(&self, doc_type: DocType, id: &str) -> Result<Value> {
        self.transport
            .get(&format!("{}/ship", Self::item_path(doc_type, id)), &[])
            .await
    }

    /// Attach a file to a document.
    pub async fn attach(&self, doc_type: DocType, id: &str, data: &Value) -> Result<Value> {
        self.transport
            .post(
                &format!("{}/attach", Self::item_path(doc_type, id)),
                Some(data),
            )
            .await
    }

    /// Update shipment tracking information.
    pub async fn update_tracking(&self, doc_type: DocType, id: &str, data: &Value) -> Result<Value> {
        self.transport
            .post(
                &format!("{}/tracking", Self::item_path(doc_type, id)),
                Some(data),
            )
            .await
    }

    /// Move a document within its pipeline.
    pub async fn update_pipeline(&self, doc_type: DocType, id: &str, data: &Value) -> Result<Value> {
        self.transport
            .post(
                &format!("{}/pipeline", Self::item_path(doc_type, id)),
                Some(data),
            )
            .await
    }
}

/// Start of the current UTC day, in Unix seconds.
fn start_of_current_utc_day() -> i64 {
    let now = chrono::Utc::now().timestamp();
    now - now.rem_euclid(SECONDS_PER_DAY)
}
