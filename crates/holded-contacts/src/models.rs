//! Contact domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A contact (customer, supplier, lead, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Server-assigned identifier
    pub id: String,

    /// Contact name
    #[serde(default)]
    pub name: String,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// VAT number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vatnumber: Option<String>,

    /// Contact kind (client, supplier, ...)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file attached to a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactAttachment {
    /// Server-assigned identifier
    pub id: String,

    /// File name
    #[serde(default)]
    pub name: String,

    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A contact group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactGroup {
    /// Server-assigned identifier
    pub id: String,

    /// Group name
    #[serde(default)]
    pub name: String,

    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
