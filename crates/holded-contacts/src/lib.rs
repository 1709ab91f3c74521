//! # holded-contacts
//!
//! Contacts and contact groups for the Holded API gateway.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod models;

pub use client::ContactsClient;
pub use models::{Contact, ContactAttachment, ContactGroup};
