//! # holded-core
//!
//! Core building blocks for the Holded API gateway.
//!
//! This crate provides the HTTP transport (authentication, rate-limit
//! retries, error classification), the error taxonomy shared by every
//! resource crate, and the generic resource tiers most Holded endpoints
//! are composed from.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and the CLI error envelope
//! - [`config`] - Gateway configuration and credential resolution
//! - [`transport`] - Authenticated HTTP transport with retry handling
//! - [`resource`] - Generic CRUD / read-only / list-only resource tiers

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod resource;
pub mod transport;

// Re-export commonly used types
pub use config::GatewayConfig;
pub use error::{Error, ErrorEnvelope, Result};
pub use resource::{CrudResource, ListOnlyResource, ListParams, ReadOnlyResource};
pub use transport::Transport;
