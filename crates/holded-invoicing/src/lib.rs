//! # holded-invoicing
//!
//! Invoicing clients for the Holded API gateway: documents (including
//! duplication and the approval gate), numbering series, services and
//! payment methods.
//!
//! ## Modules
//!
//! - [`models`] - Document types and entity models
//! - [`documents`] - Documents client with CRUD, sub-actions and duplication
//! - [`duplicate`] - Payload remapping and the `approveDoc` safety gate
//! - [`series`] - Numbering series client

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod documents;
pub mod duplicate;
pub mod models;
pub mod series;

pub use documents::{DocumentsClient, DuplicateOptions};
pub use duplicate::{apply_approval_gate, build_duplicate_payload, SERVER_MANAGED_FIELDS};
pub use models::{DocType, Document, InvoicingService, NumberingSeries, PaymentMethod};
pub use series::NumberingSeriesClient;

use holded_core::{CrudResource, ListOnlyResource, Transport};

const SERVICES_PATH: &str = "/invoicing/v1/services";
const PAYMENT_METHODS_PATH: &str = "/invoicing/v1/paymentmethods";

/// Entry point for the invoicing domain.
#[derive(Clone)]
pub struct InvoicingClient {
    transport: Transport,
}

impl InvoicingClient {
    /// Create an invoicing client on top of the given transport.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Documents client (CRUD, sub-actions, duplication).
    #[must_use]
    pub fn documents(&self) -> DocumentsClient {
        DocumentsClient::new(self.transport.clone())
    }

    /// Numbering series client.
    #[must_use]
    pub fn numbering_series(&self) -> NumberingSeriesClient {
        NumberingSeriesClient::new(self.transport.clone())
    }

    /// Billable services (full CRUD tier).
    #[must_use]
    pub fn services(&self) -> CrudResource<InvoicingService> {
        CrudResource::new(self.transport.clone(), SERVICES_PATH)
    }

    /// Payment methods (list-only tier).
    #[must_use]
    pub fn payment_methods(&self) -> ListOnlyResource<PaymentMethod> {
        ListOnlyResource::new(self.transport.clone(), PAYMENT_METHODS_PATH)
    }
}
