//! # holded-stock
//!
//! Products and warehouses for the Holded API gateway.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod models;

pub use client::{ProductsClient, WarehousesClient};
pub use models::{Product, ProductImage, Warehouse};
