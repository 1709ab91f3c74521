//! Invoicing domain models.
//!
//! The remote schema is not under this crate's control, so every entity
//! keeps a small set of typed fields plus an open map of everything else,
//! merged back on serialization via `#[serde(flatten)]`.

use holded_core::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Document types supported by the invoicing API.
///
/// The type is embedded as a path segment, e.g.
/// `/invoicing/v1/documents/invoice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Sales invoice
    Invoice,
    /// Sales receipt (ticket)
    SalesReceipt,
    /// Credit note
    CreditNote,
    /// Sales order
    SalesOrder,
    /// Proforma invoice
    Proforma,
    /// Waybill (delivery note)
    Waybill,
    /// Estimate (quote)
    Estimate,
    /// Purchase invoice
    Purchase,
    /// Purchase order
    PurchaseOrder,
    /// Purchase refund
    PurchaseRefund,
}

impl DocType {
    /// All document types, in wire-name order.
    pub const ALL: [Self; 10] = [
        Self::Invoice,
        Self::SalesReceipt,
        Self::CreditNote,
        Self::SalesOrder,
        Self::Proforma,
        Self::Waybill,
        Self::Estimate,
        Self::Purchase,
        Self::PurchaseOrder,
        Self::PurchaseRefund,
    ];

    /// Wire name used in request paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::SalesReceipt => "salesreceipt",
            Self::CreditNote => "creditnote",
            Self::SalesOrder => "salesorder",
            Self::Proforma => "proforma",
            Self::Waybill => "waybill",
            Self::Estimate => "estimate",
            Self::Purchase => "purchase",
            Self::PurchaseOrder => "purchaseorder",
            Self::PurchaseRefund => "purchaserefund",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = Error;

    /// Parse a wire name. An unknown name fails before any network call.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|doc_type| doc_type.as_str() == s)
            .ok_or_else(|| {
                let valid = Self::ALL.map(DocType::as_str).join(", ");
                Error::InvalidInput(format!(
                    "Invalid document type \"{s}\". Must be one of: {valid}"
                ))
            })
    }
}

/// An invoicing document, as returned by the read endpoints.
///
/// Write payloads use different field names for some of these (see the
/// duplication engine); this struct models the read shape only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Server-assigned identifier
    pub id: String,

    /// Related contact identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,

    /// Denormalized contact name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,

    /// Server-assigned sequence number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_number: Option<String>,

    /// Document date (Unix seconds, UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,

    /// Due date (Unix seconds, UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,

    /// Currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Computed subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,

    /// Computed total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A numbering series for a document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberingSeries {
    /// Server-assigned identifier
    pub id: String,

    /// Series name
    #[serde(default)]
    pub name: String,

    /// Optional number prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A billable service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicingService {
    /// Server-assigned identifier
    pub id: String,

    /// Service name
    #[serde(default)]
    pub name: String,

    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A configured payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Server-assigned identifier
    pub id: String,

    /// Method name
    #[serde(default)]
    pub name: String,

    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn doc_type_round_trips_wire_names() {
        for doc_type in DocType::ALL {
            assert_eq!(doc_type.as_str().parse::<DocType>().unwrap(), doc_type);
        }
    }

    #[test]
    fn doc_type_rejects_unknown_names() {
        let err = "memo".parse::<DocType>().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("invoice"));
    }

    #[test]
    fn doc_type_serializes_as_wire_name() {
        assert_eq!(
            serde_json::to_value(DocType::PurchaseOrder).unwrap(),
            json!("purchaseorder")
        );
    }

    #[test]
    fn document_preserves_unknown_fields() {
        let document: Document = serde_json::from_value(json!({
            "id": "d1",
            "contactId": "c1",
            "docNumber": "F25-0001",
            "date": 1_735_689_600,
            "customField": {"nested": true}
        }))
        .unwrap();

        assert_eq!(document.contact_id.as_deref(), Some("c1"));
        assert_eq!(document.doc_number.as_deref(), Some("F25-0001"));
        assert_eq!(document.extra["customField"]["nested"], true);

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["customField"]["nested"], true);
        assert_eq!(value["contactId"], "c1");
    }
}
