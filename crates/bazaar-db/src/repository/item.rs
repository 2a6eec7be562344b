//! # Item Repository
//!
//! Database operations for the item catalog.
//!
//! ## Key Operations
//! - One-query projection fetch for order pricing (`get_catalog`)
//! - Conditional stock decrement (`record_purchase`)
//! - Purchase-count report for admin aggregation
//!
//! ## Stock Updates Under Race
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Conditional Decrement Strategy                       │
//! │                                                                         │
//! │  ❌ WRONG: read stock, check in Rust, write absolute value             │
//! │     Two racing purchases both read 5, both write 5 - 3 = 2             │
//! │     → 6 units sold out of 5                                            │
//! │                                                                         │
//! │  ✅ CORRECT: single conditional UPDATE                                 │
//! │     UPDATE items SET available_qty = available_qty - ?                 │
//! │     WHERE id = ? AND available_qty >= ?                                │
//! │                                                                         │
//! │  The second racer matches zero rows and the caller gets a              │
//! │  StockConflict instead of negative stock.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use bazaar_core::{CatalogEntry, Item};

/// A row of the purchased-items admin report.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ItemPurchaseCount {
    pub name: String,
    pub purchased_count: i64,
}

/// Repository for item catalog operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Fetches the pricing projection for exactly the given item ids, in one
    /// query.
    ///
    /// ## Contract
    /// - Projection is limited to id, name, price, available quantity
    /// - Inactive items are treated as absent
    /// - Missing ids simply produce no row; the caller decides what that
    ///   means (order pricing reports them as unavailable)
    pub async fn get_catalog(&self, ids: &[&str]) -> DbResult<Vec<CatalogEntry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(requested = ids.len(), "Fetching catalog projection");

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, name, price_paise, available_qty FROM items \
             WHERE is_active = 1 AND id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let entries: Vec<CatalogEntry> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        debug!(found = entries.len(), "Catalog projection fetched");
        Ok(entries)
    }

    /// Gets an item by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price_paise, available_qty, purchased_count,
                   is_active, created_at, updated_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new item.
    pub async fn insert(&self, item: &Item) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting item");

        sqlx::query(
            r#"
            INSERT INTO items (
                id, name, price_paise, available_qty, purchased_count,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_paise)
        .bind(item.available_qty)
        .bind(item.purchased_count)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records a purchase: decrements available stock and increments the
    /// purchased count, only if enough stock remains.
    ///
    /// This is the authoritative stock mutation. Order creation itself only
    /// reads the catalog; inventory processes call this afterwards.
    ///
    /// ## Errors
    /// - `StockConflict` when the item exists but the decrement would go
    ///   below zero (the conditional UPDATE matched no row)
    /// - `NotFound` when the item doesn't exist or is inactive
    pub async fn record_purchase(&self, id: &str, quantity: i64) -> DbResult<()> {
        debug!(id = %id, quantity = %quantity, "Recording purchase");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items SET
                available_qty = available_qty - ?2,
                purchased_count = purchased_count + ?2,
                updated_at = ?3
            WHERE id = ?1 AND is_active = 1 AND available_qty >= ?2
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish "not enough stock" from "no such item"
            return match self.get_by_id(id).await? {
                Some(item) if item.is_active => Err(DbError::StockConflict {
                    item: item.name,
                    available: item.available_qty,
                    requested: quantity,
                }),
                _ => Err(DbError::not_found("Item", id)),
            };
        }

        Ok(())
    }

    /// Restocks an item (positive delta).
    pub async fn restock(&self, id: &str, quantity: i64) -> DbResult<()> {
        debug!(id = %id, quantity = %quantity, "Restocking item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items SET
                available_qty = available_qty + ?2,
                updated_at = ?3
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Lists (name, purchased_count) for every active item, ordered by name.
    ///
    /// Backs the admin purchased-items report.
    pub async fn list_purchased(&self) -> DbResult<Vec<ItemPurchaseCount>> {
        let rows = sqlx::query_as::<_, ItemPurchaseCount>(
            r#"
            SELECT name, purchased_count
            FROM items
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Soft-deletes an item by setting is_active = false.
    ///
    /// Historical order lines still reference it via snapshots.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items SET is_active = 0, updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Counts active items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new item ID.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_item(name: &str, price_paise: i64, available_qty: i64) -> Item {
        let now = Utc::now();
        Item {
            id: generate_item_id(),
            name: name.to_string(),
            price_paise,
            available_qty,
            purchased_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let item = sample_item("Basmati Rice 5kg", 45_000, 12);

        db.items().insert(&item).await.unwrap();

        let fetched = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Basmati Rice 5kg");
        assert_eq!(fetched.price(), bazaar_core::Money::from_paise(45_000));
        assert_eq!(fetched.available_qty, 12);
        assert_eq!(fetched.purchased_count, 0);
    }

    #[tokio::test]
    async fn test_restock_adds_stock() {
        let db = test_db().await;
        let item = sample_item("Tata Salt 1kg", 2_800, 5);
        db.items().insert(&item).await.unwrap();

        db.items().restock(&item.id, 20).await.unwrap();

        let after = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(after.available_qty, 25);
        // Restocking never touches the purchase counter
        assert_eq!(after.purchased_count, 0);
    }

    #[tokio::test]
    async fn test_get_catalog_projection() {
        let db = test_db().await;
        let a = sample_item("Toor Dal 1kg", 15_500, 8);
        let b = sample_item("Masala Chai 250g", 9_900, 3);
        db.items().insert(&a).await.unwrap();
        db.items().insert(&b).await.unwrap();

        let entries = db
            .items()
            .get_catalog(&[a.id.as_str(), b.id.as_str(), "missing-id"])
            .await
            .unwrap();

        // Missing ids produce no row; present ones carry the projection
        assert_eq!(entries.len(), 2);
        let chai = entries.iter().find(|e| e.id == b.id).unwrap();
        assert_eq!(chai.name, "Masala Chai 250g");
        assert_eq!(chai.price_paise, 9_900);
        assert_eq!(chai.available_qty, 3);
    }

    #[tokio::test]
    async fn test_get_catalog_skips_inactive() {
        let db = test_db().await;
        let item = sample_item("Parle-G 800g", 9_000, 20);
        db.items().insert(&item).await.unwrap();
        db.items().soft_delete(&item.id).await.unwrap();

        let entries = db.items().get_catalog(&[item.id.as_str()]).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_record_purchase_moves_stock_to_purchased() {
        let db = test_db().await;
        let item = sample_item("Amul Butter 500g", 27_500, 10);
        db.items().insert(&item).await.unwrap();

        db.items().record_purchase(&item.id, 4).await.unwrap();

        let after = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(after.available_qty, 6);
        assert_eq!(after.purchased_count, 4);
    }

    #[tokio::test]
    async fn test_record_purchase_refuses_to_oversell() {
        let db = test_db().await;
        let item = sample_item("Maggi Noodles 12-pack", 16_800, 3);
        db.items().insert(&item).await.unwrap();

        let err = db.items().record_purchase(&item.id, 4).await.unwrap_err();
        match err {
            DbError::StockConflict {
                item: name,
                available,
                requested,
            } => {
                assert_eq!(name, "Maggi Noodles 12-pack");
                assert_eq!(available, 3);
                assert_eq!(requested, 4);
            }
            other => panic!("unexpected error: {other}"),
        }

        // Nothing changed
        let after = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(after.available_qty, 3);
        assert_eq!(after.purchased_count, 0);
    }

    #[tokio::test]
    async fn test_record_purchase_unknown_item() {
        let db = test_db().await;
        let err = db.items().record_purchase("no-such-id", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_purchased_ordering() {
        let db = test_db().await;
        let a = sample_item("Toor Dal 1kg", 15_500, 10);
        let b = sample_item("Basmati Rice 5kg", 45_000, 10);
        db.items().insert(&a).await.unwrap();
        db.items().insert(&b).await.unwrap();
        db.items().record_purchase(&a.id, 2).await.unwrap();

        let rows = db.items().list_purchased().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Basmati Rice 5kg");
        assert_eq!(rows[0].purchased_count, 0);
        assert_eq!(rows[1].name, "Toor Dal 1kg");
        assert_eq!(rows[1].purchased_count, 2);
    }
}
