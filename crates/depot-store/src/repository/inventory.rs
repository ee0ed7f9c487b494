//! # Inventory Repository
//!
//! Storage operations for the product collection.
//!
//! ## Key Operations
//! - CRUD with validated inputs and issued ids
//! - Substring search over name/sku/category
//! - Stock filters backed by the classifier
//!
//! ## Id Issuance
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Id Issuance                                  │
//! │                                                                         │
//! │  add(new_product)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN TRANSACTION                                                      │
//! │    seq_product: 7 → 8          ← monotonic counter, never reset        │
//! │    id = "P008"                  ← zero-padded business id              │
//! │    append to manager_inventory                                         │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Deleting P008 later does NOT free the number: the next add issues     │
//! │  P009. Ids are never reused, so invoices keep valid references.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::kv::{self, keys};
use depot_core::classify::classify_stock;
use depot_core::validation::{
    validate_min_stock, validate_name, validate_price, validate_quantity, validate_search_query,
    validate_sku,
};
use depot_core::{Money, Product, StockLevel, ValidationError};

// =============================================================================
// Input Shapes
// =============================================================================

/// Fields for a new product; the repository issues the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: Money,
    pub quantity: i64,
    pub unit: String,
    pub min_stock: i64,
    pub room: Option<String>,
    pub rack: Option<String>,
    pub freezer: Option<String>,
}

/// Partial update for a product; `Some` fields replace, `None` fields keep.
///
/// Placement fields cannot be cleared through a patch; moving a product out
/// of a room is an explicit edit with a new placement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub min_stock: Option<i64>,
    pub room: Option<String>,
    pub rack: Option<String>,
    pub freezer: Option<String>,
}

impl ProductPatch {
    /// A patch that only changes the stock quantity.
    pub fn quantity(quantity: i64) -> Self {
        ProductPatch {
            quantity: Some(quantity),
            ..ProductPatch::default()
        }
    }

    fn validate(&self) -> StoreResult<()> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(min_stock) = self.min_stock {
            validate_min_stock(min_stock)?;
        }
        Ok(())
    }

    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            product.unit = unit;
        }
        if let Some(min_stock) = self.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(room) = self.room {
            product.room = Some(room);
        }
        if let Some(rack) = self.rack {
            product.rack = Some(rack);
        }
        if let Some(freezer) = self.freezer {
            product.freezer = Some(freezer);
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product storage operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.inventory();
/// let all = repo.list().await?;
/// let low = repo.low_stock().await?;
/// let updated = repo.update_item("P001", ProductPatch::quantity(140)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Lists the whole inventory. Empty vec when the store is unseeded;
    /// never fails on absence.
    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(kv::read_json(&self.pool, keys::INVENTORY)
            .await?
            .unwrap_or_default())
    }

    /// Replaces the whole inventory collection.
    pub async fn set_all(&self, inventory: &[Product]) -> StoreResult<()> {
        kv::write_json(&self.pool, keys::INVENTORY, inventory).await
    }

    /// Gets a product by its id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.list().await?.into_iter().find(|p| p.id == id))
    }

    /// Adds a product, issuing the next `P{n:03}` id.
    ///
    /// ## Errors
    /// - Validation failures on name/sku/price/quantity/min_stock
    /// - Duplicate SKU within the collection
    pub async fn add(&self, new: NewProduct) -> StoreResult<Product> {
        debug!(sku = %new.sku, "Adding product");

        validate_name("name", &new.name)?;
        validate_sku(&new.sku)?;
        validate_price(new.price)?;
        validate_quantity(new.quantity)?;
        validate_min_stock(new.min_stock)?;

        let mut tx = self.pool.begin().await?;

        let mut inventory: Vec<Product> = kv::read_json(&mut *tx, keys::INVENTORY)
            .await?
            .unwrap_or_default();

        if inventory.iter().any(|p| p.sku == new.sku) {
            return Err(ValidationError::Duplicate {
                field: "sku".to_string(),
                value: new.sku,
            }
            .into());
        }

        let seq = kv::next_sequence(&mut tx, keys::PRODUCT_SEQ).await?;
        let product = Product {
            id: format!("P{seq:03}"),
            name: new.name,
            sku: new.sku,
            category: new.category,
            price: new.price,
            quantity: new.quantity,
            unit: new.unit,
            min_stock: new.min_stock,
            room: new.room,
            rack: new.rack,
            freezer: new.freezer,
        };

        inventory.push(product.clone());
        kv::write_json(&mut *tx, keys::INVENTORY, &inventory).await?;
        tx.commit().await?;

        debug!(id = %product.id, "Product added");
        Ok(product)
    }

    /// Merges a patch into the matching product and persists the collection.
    ///
    /// ## Errors
    /// - `StoreError::NotFound` on an unknown id
    /// - Validation failures on patched fields
    pub async fn update_item(&self, id: &str, patch: ProductPatch) -> StoreResult<Product> {
        debug!(id = %id, "Updating product");

        patch.validate()?;

        let mut tx = self.pool.begin().await?;

        let mut inventory: Vec<Product> = kv::read_json(&mut *tx, keys::INVENTORY)
            .await?
            .unwrap_or_default();

        let product = inventory
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        patch.apply(product);
        let updated = product.clone();

        kv::write_json(&mut *tx, keys::INVENTORY, &inventory).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Deletes a product by id.
    ///
    /// Invoices keep their frozen line snapshots, so history survives the
    /// deletion.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting product");

        let mut tx = self.pool.begin().await?;

        let mut inventory: Vec<Product> = kv::read_json(&mut *tx, keys::INVENTORY)
            .await?
            .unwrap_or_default();

        let before = inventory.len();
        inventory.retain(|p| p.id != id);
        if inventory.len() == before {
            return Err(StoreError::not_found("Product", id));
        }

        kv::write_json(&mut *tx, keys::INVENTORY, &inventory).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Case-insensitive substring search over name, sku and category.
    pub async fn search(&self, query: &str) -> StoreResult<Vec<Product>> {
        let query = validate_search_query(query)?.to_lowercase();

        let inventory = self.list().await?;
        if query.is_empty() {
            return Ok(inventory);
        }

        Ok(inventory
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.sku.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
            })
            .collect())
    }

    /// Products below their reorder floor.
    pub async fn low_stock(&self) -> StoreResult<Vec<Product>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(Product::is_low_stock)
            .collect())
    }

    /// Products with zero stock.
    pub async fn out_of_stock(&self) -> StoreResult<Vec<Product>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|p| p.quantity == 0)
            .collect())
    }

    /// Products in the given category (exact match).
    pub async fn by_category(&self, category: &str) -> StoreResult<Vec<Product>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Products whose stock classifies into the given level.
    pub async fn by_stock_level(&self, level: StockLevel) -> StoreResult<Vec<Product>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|p| classify_stock(p.quantity, p.min_stock) == level)
            .collect())
    }

    /// Decrements quantities for fulfilled invoice lines, inside the
    /// caller's transaction.
    ///
    /// Lines are pre-validated against the same snapshot, so a missing id
    /// or negative result indicates the transaction must roll back.
    pub(crate) async fn decrement_in(
        conn: &mut SqliteConnection,
        lines: &[(String, i64)],
    ) -> StoreResult<()> {
        let mut inventory: Vec<Product> = kv::read_json(&mut *conn, keys::INVENTORY)
            .await?
            .unwrap_or_default();

        for (product_id, quantity) in lines {
            let product = inventory
                .iter_mut()
                .find(|p| &p.id == product_id)
                .ok_or_else(|| StoreError::not_found("Product", product_id))?;
            product.quantity -= quantity;
        }

        kv::write_json(&mut *conn, keys::INVENTORY, &inventory).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    async fn seeded_store() -> Store {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.seed().await.unwrap();
        store
    }

    fn new_product(sku: &str) -> NewProduct {
        NewProduct {
            name: "Sunflower Oil 2L".to_string(),
            sku: sku.to_string(),
            category: "Oils".to_string(),
            price: Money::from_cents(1250),
            quantity: 60,
            unit: "bottles".to_string(),
            min_stock: 20,
            room: Some("Room B".to_string()),
            rack: Some("R06".to_string()),
            freezer: None,
        }
    }

    #[tokio::test]
    async fn test_list_unseeded_is_empty_not_an_error() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        assert!(store.inventory().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_issues_sequential_ids() {
        let store = seeded_store().await;
        let repo = store.inventory();

        // Seed dataset ends at P007
        let added = repo.add(new_product("OIL002")).await.unwrap();
        assert_eq!(added.id, "P008");

        let next = repo.add(new_product("OIL003")).await.unwrap();
        assert_eq!(next.id, "P009");
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = seeded_store().await;
        let repo = store.inventory();

        let added = repo.add(new_product("OIL002")).await.unwrap();
        assert_eq!(added.id, "P008");
        repo.delete("P008").await.unwrap();

        let next = repo.add(new_product("OIL003")).await.unwrap();
        assert_eq!(next.id, "P009");
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_sku() {
        let store = seeded_store().await;
        let err = store.inventory().add(new_product("RIC001")).await.unwrap_err();
        assert!(matches!(err, StoreError::Domain(_)));
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let store = seeded_store().await;
        let repo = store.inventory();

        let updated = repo
            .update_item("P001", ProductPatch::quantity(140))
            .await
            .unwrap();
        assert_eq!(updated.quantity, 140);
        // Untouched fields survive
        assert_eq!(updated.name, "Premium Rice 5kg");

        let reread = repo.get_by_id("P001").await.unwrap().unwrap();
        assert_eq!(reread.quantity, 140);
    }

    #[tokio::test]
    async fn test_update_unknown_id_surfaces_not_found() {
        let store = seeded_store().await;
        let err = store
            .inventory()
            .update_item("P999", ProductPatch::quantity(1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_patch() {
        let store = seeded_store().await;
        let err = store
            .inventory()
            .update_item("P001", ProductPatch::quantity(-5))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Domain(_)));
        // And the product is untouched
        let product = store.inventory().get_by_id("P001").await.unwrap().unwrap();
        assert_eq!(product.quantity, 150);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_surfaces_not_found() {
        let store = seeded_store().await;
        let err = store.inventory().delete("P999").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_search_matches_name_sku_category() {
        let store = seeded_store().await;
        let repo = store.inventory();

        let by_name = repo.search("rice").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "P001");

        let by_sku = repo.search("OIL0").await.unwrap();
        assert_eq!(by_sku.len(), 1);

        let by_category = repo.search("frozen").await.unwrap();
        assert_eq!(by_category.len(), 2);

        let all = repo.search("").await.unwrap();
        assert_eq!(all.len(), 7);
    }

    #[tokio::test]
    async fn test_stock_filters() {
        let store = seeded_store().await;
        let repo = store.inventory();

        // Every seed product sits at or above its floor
        assert!(repo.low_stock().await.unwrap().is_empty());

        repo.update_item("P003", ProductPatch::quantity(10))
            .await
            .unwrap();
        let low = repo.low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, "P003");

        // 10/40 = 25% → Critical
        let critical = repo.by_stock_level(StockLevel::Critical).await.unwrap();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].id, "P003");

        repo.update_item("P003", ProductPatch::quantity(0))
            .await
            .unwrap();
        assert_eq!(repo.out_of_stock().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_by_category() {
        let store = seeded_store().await;
        let grains = store.inventory().by_category("Grains").await.unwrap();
        assert_eq!(grains.len(), 3);
    }
}
