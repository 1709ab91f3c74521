//! Products and warehouses clients.

use crate::models::{Product, ProductImage, Warehouse};
use holded_core::resource::{CrudResource, ListParams};
use holded_core::{Result, Transport};
use serde_json::Value;

const PRODUCTS_PATH: &str = "/invoicing/v1/products";
const WAREHOUSES_PATH: &str = "/invoicing/v1/warehouses";

/// Asynchronous client for products.
#[derive(Clone)]
pub struct ProductsClient {
    inner: CrudResource<Product>,
}

impl ProductsClient {
    /// Create a products client on top of the given transport.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self {
            inner: CrudResource::new(transport, PRODUCTS_PATH),
        }
    }

    /// List products with optional pagination.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Product>> {
        self.inner.list(params).await
    }

    /// Fetch a single product.
    pub async fn get(&self, id: &str) -> Result<Product> {
        self.inner.get(id).await
    }

    /// Create a product from an open JSON record.
    pub async fn create(&self, data: &Value) -> Result<Product> {
        self.inner.create(data).await
    }

    /// Update a product.
    pub async fn update(&self, id: &str, data: &Value) -> Result<Product> {
        self.inner.update(id, data).await
    }

    /// Delete a product.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.inner.delete(id).await
    }

    /// Download the main product image as raw bytes.
    pub async fn image(&self, id: &str) -> Result<Vec<u8>> {
        self.inner
            .transport()
            .get_binary(&format!("{PRODUCTS_PATH}/{id}/image"))
            .await
    }

    /// List the secondary images of a product.
    pub async fn list_images(&self, id: &str) -> Result<Vec<ProductImage>> {
        self.inner
            .transport()
            .get(&format!("{PRODUCTS_PATH}/{id}/images"), &[])
            .await
    }

    /// Download a secondary product image as raw bytes.
    pub async fn secondary_image(&self, id: &str, filename: &str) -> Result<Vec<u8>> {
        self.inner
            .transport()
            .get_binary(&format!("{PRODUCTS_PATH}/{id}/image/{filename}"))
            .await
    }

    /// Adjust the stock levels of a product.
    pub async fn update_stock(&self, id: &str, data: &Value) -> Result<Value> {
        self.inner
            .transport()
            .put(&format!("{PRODUCTS_PATH}/{id}/stock"), data)
            .await
    }
}

/// Asynchronous client for warehouses.
#[derive(Clone)]
pub struct WarehousesClient {
    inner: CrudResource<Warehouse>,
}

impl WarehousesClient {
    /// Create a warehouses client on top of the given transport.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self {
            inner: CrudResource::new(transport, WAREHOUSES_PATH),
        }
    }

    /// List warehouses with optional pagination.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Warehouse>> {
        self.inner.list(params).await
    }

    /// Fetch a single warehouse.
    pub async fn get(&self, id: &str) -> Result<Warehouse> {
        self.inner.get(id).await
    }

    /// Create a warehouse from an open JSON record.
    pub async fn create(&self, data: &Value) -> Result<Warehouse> {
        self.inner.create(data).await
    }

    /// Update a warehouse.
    pub async fn update(&self, id: &str, data: &Value) -> Result<Warehouse> {
        self.inner.update(id, data).await
    }

    /// Delete a warehouse.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.inner.delete(id).await
    }

    /// List the stock held in a warehouse.
    pub async fn list_stock(&self, id: &str) -> Result<Vec<Value>> {
        self.inner
            .transport()
            .get(&format!("{WAREHOUSES_PATH}/{id}/stock"), &[])
            .await
    }
}
