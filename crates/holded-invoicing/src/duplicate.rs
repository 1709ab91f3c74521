//! Payload construction for document duplication.
//!
//! The Holded API is asymmetric between reads and writes of the same
//! document:
//!
//! ```text
//! GET  /documents/{docType}/{id}  ->  contact, products[].price
//! POST /documents/{docType}       ->  contactId, items[].subtotal
//! ```
//!
//! and a read additionally carries server-managed fields that must never be
//! echoed on create. [`build_duplicate_payload`] reconciles all of this;
//! [`apply_approval_gate`] guards the irreversible `approveDoc` flag.

use serde_json::{Map, Value};

/// Fields present in a read representation that must never be resubmitted
/// on create.
pub const SERVER_MANAGED_FIELDS: [&str; 12] = [
    "id",
    "docNumber",
    "status",
    "approvedAt",
    "paymentsTotal",
    "paymentsPending",
    "paymentsRefunds",
    "draft",
    "tax",
    "subtotal",
    "total",
    "contactName",
];

/// Build a creation payload from a source document read response.
///
/// Pure function: strips [`SERVER_MANAGED_FIELDS`], renames `contact` to
/// `contactId`, renames `products` to `items` (with `price` renamed to
/// `subtotal` inside each item), sets `date` to `date_ts`, then
/// shallow-merges `overrides` last so override keys win on collision,
/// `date` included.
///
/// The `approveDoc` flag is deliberately not set here; callers must run
/// the payload through [`apply_approval_gate`].
#[must_use]
pub fn build_duplicate_payload(
    source: &Map<String, Value>,
    date_ts: i64,
    overrides: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let mut payload = Map::new();

    for (key, value) in source {
        if !SERVER_MANAGED_FIELDS.contains(&key.as_str()) {
            payload.insert(key.clone(), value.clone());
        }
    }

    if let Some(contact) = payload.remove("contact") {
        payload.insert("contactId".to_string(), contact);
    }

    if payload.get("products").is_some_and(Value::is_array) {
        if let Some(Value::Array(products)) = payload.remove("products") {
            let items = products
                .into_iter()
                .map(|product| match product {
                    Value::Object(mut item) => {
                        if let Some(price) = item.remove("price") {
                            item.insert("subtotal".to_string(), price);
                        }
                        Value::Object(item)
                    }
                    other => other,
                })
                .collect();
            payload.insert("items".to_string(), Value::Array(items));
        }
    }

    payload.insert("date".to_string(), Value::from(date_ts));

    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            payload.insert(key.clone(), value.clone());
        }
    }

    payload
}

/// Apply the `approveDoc` safety gate to a create payload.
///
/// Approval is irreversible: an approved document can no longer be edited
/// or deleted. The flag therefore becomes `true` only when both intents
/// are affirmatively `true`; in every other case it is forced to `false`.
///
/// A pre-existing `approveDoc: true` in the payload (e.g. copied in via a
/// raw override) is never honored. When one is discarded, the returned
/// warning message should be surfaced to the caller.
pub fn apply_approval_gate(
    payload: &mut Map<String, Value>,
    approve: bool,
    confirm: bool,
) -> Option<String> {
    let discarded = payload.get("approveDoc") == Some(&Value::Bool(true));

    payload.insert("approveDoc".to_string(), Value::Bool(approve && confirm));

    if discarded {
        Some(
            "approveDoc: true in the supplied payload was ignored. \
             Request approval explicitly (approve + confirm) to approve a \
             document immediately (irreversible)."
                .to_string(),
        )
    } else {
        None
    }
}
