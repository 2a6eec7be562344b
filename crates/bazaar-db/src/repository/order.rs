//! # Order Repository
//!
//! Database operations for orders and order lines, including the one
//! transaction that matters: order creation.
//!
//! ## The Order Creation Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SINGLE TRANSACTION                                │
//! │                                                                         │
//! │  1. seq_no = MAX(seq_no) + 1          ← position of this order          │
//! │                                                                         │
//! │  2. policy.discount_for(seq_no, ...)  ← pure eligibility decision       │
//! │                                                                         │
//! │  3. INSERT INTO discount_codes (...)  ← only when position qualifies    │
//! │                                                                         │
//! │  4. INSERT INTO orders (...)                                            │
//! │                                                                         │
//! │  5. INSERT INTO order_lines (...)     ← one row per priced line         │
//! │                                                                         │
//! │  COMMIT ← all rows or none; a failed transaction leaves no orphan       │
//! │          code and no partial order                                      │
//! │                                                                         │
//! │  RACE: two transactions can read the same MAX before either commits.   │
//! │  The UNIQUE index on seq_no makes the second COMMIT fail and roll      │
//! │  back whole, so position N is never held twice and a discount is       │
//! │  never double-issued. The loser surfaces as a retryable error.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::discount::insert_code;
use bazaar_core::{
    CodeStatus, DiscountCode, DiscountPolicy, Order, OrderLine, OrderStatus, PricedOrder,
};

/// The result of a committed order-creation transaction.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    /// The discount code issued inside the same transaction, when the
    /// order's position qualified.
    pub code: Option<DiscountCode>,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Creates an order atomically: sequence assignment, discount issuance,
    /// order row, and lines commit together or not at all.
    ///
    /// ## Arguments
    /// * `order_id` - Pre-generated order uuid (exists before the row so the
    ///   code can reference it)
    /// * `user_id` - The buyer
    /// * `priced` - Output of pure pricing; quantities already validated
    /// * `policy` - The periodic-discount rule, applied to the position this
    ///   transaction assigns
    pub async fn create_with_discount(
        &self,
        order_id: &str,
        user_id: &str,
        priced: &PricedOrder,
        policy: &DiscountPolicy,
    ) -> DbResult<PlacedOrder> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Position of the order being created: existing count + 1, assigned
        // inside the transaction that inserts it. Guarded by UNIQUE(seq_no).
        let seq_no: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(seq_no), 0) + 1 FROM orders")
            .fetch_one(&mut *tx)
            .await?;

        let discount = policy.discount_for(seq_no, priced.subtotal());

        let code = discount.map(|amount| DiscountCode {
            id: Uuid::new_v4().to_string(),
            discount_percent: policy.percent(),
            status: CodeStatus::Active,
            discount_paise: Some(amount.paise()),
            order_id: Some(order_id.to_string()),
            created_at: now,
        });

        if let Some(code) = &code {
            debug!(order_id = %order_id, code = %code.id, seq_no = %seq_no, "Issuing discount code");
            insert_code(&mut tx, code).await?;
        }

        let discount_paise = discount.map_or(0, |m| m.paise());
        let order = Order {
            id: order_id.to_string(),
            user_id: user_id.to_string(),
            status: OrderStatus::Created,
            seq_no,
            subtotal_paise: priced.subtotal_paise,
            discount_paise,
            total_paise: priced.subtotal_paise - discount_paise,
            discount_code: code.as_ref().map(|c| c.id.clone()),
            created_at: now,
        };

        debug!(id = %order.id, seq_no = %seq_no, total = %order.total_paise, "Inserting order");

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, user_id, status, seq_no,
                subtotal_paise, discount_paise, total_paise,
                discount_code, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(order.status)
        .bind(order.seq_no)
        .bind(order.subtotal_paise)
        .bind(order.discount_paise)
        .bind(order.total_paise)
        .bind(&order.discount_code)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for line in &priced.lines {
            sqlx::query(
                r#"
                INSERT INTO order_lines (
                    id, order_id, item_id, name_snapshot,
                    unit_price_paise, quantity, line_total_paise, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(order_id)
            .bind(&line.item_id)
            .bind(&line.name)
            .bind(line.unit_price_paise)
            .bind(line.quantity)
            .bind(line.line_total_paise)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(PlacedOrder { order, code })
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, status, seq_no,
                   subtotal_paise, discount_paise, total_paise,
                   discount_code, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all lines for an order, in insertion order.
    pub async fn get_lines(&self, order_id: &str) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT id, order_id, item_id, name_snapshot,
                   unit_price_paise, quantity, line_total_paise, created_at
            FROM order_lines
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Counts existing orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Sums order totals (after discount) over all orders.
    ///
    /// Zero orders is a valid zero sum, not an error: only infrastructure
    /// failures surface as `Err` here.
    pub async fn total_purchase_amount(&self) -> DbResult<i64> {
        let total: Option<i64> = sqlx::query_scalar("SELECT SUM(total_paise) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(total.unwrap_or(0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bazaar_core::PricedLine;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn priced(subtotal: i64) -> PricedOrder {
        PricedOrder {
            lines: vec![PricedLine {
                item_id: "item-1".to_string(),
                name: "Basmati Rice 5kg".to_string(),
                unit_price_paise: subtotal,
                quantity: 1,
                line_total_paise: subtotal,
            }],
            subtotal_paise: subtotal,
        }
    }

    #[tokio::test]
    async fn test_sequence_starts_at_one_and_increments() {
        let db = test_db().await;
        let policy = DiscountPolicy::new(5, 10).unwrap();

        let first = db
            .orders()
            .create_with_discount(&Uuid::new_v4().to_string(), "u1", &priced(1_000), &policy)
            .await
            .unwrap();
        let second = db
            .orders()
            .create_with_discount(&Uuid::new_v4().to_string(), "u2", &priced(2_000), &policy)
            .await
            .unwrap();

        assert_eq!(first.order.seq_no, 1);
        assert_eq!(second.order.seq_no, 2);
        assert_eq!(db.orders().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_non_qualifying_order_has_no_discount() {
        let db = test_db().await;
        let policy = DiscountPolicy::new(5, 10).unwrap();

        let placed = db
            .orders()
            .create_with_discount(&Uuid::new_v4().to_string(), "u1", &priced(10_000), &policy)
            .await
            .unwrap();

        assert_eq!(placed.order.discount_paise, 0);
        assert_eq!(placed.order.total_paise, 10_000);
        assert!(placed.order.discount_code.is_none());
        assert!(placed.code.is_none());
    }

    #[tokio::test]
    async fn test_qualifying_order_issues_code_in_same_transaction() {
        let db = test_db().await;
        // Period 1: every order qualifies
        let policy = DiscountPolicy::new(1, 10).unwrap();
        let order_id = Uuid::new_v4().to_string();

        let placed = db
            .orders()
            .create_with_discount(&order_id, "u1", &priced(10_000), &policy)
            .await
            .unwrap();

        assert_eq!(placed.order.discount_paise, 1_000);
        assert_eq!(placed.order.total_paise, 9_000);

        let code = placed.code.expect("code issued");
        assert_eq!(code.status, CodeStatus::Active);
        assert_eq!(code.discount_percent, 10);
        assert_eq!(code.discount_paise, Some(1_000));
        assert_eq!(code.order_id.as_deref(), Some(order_id.as_str()));
        assert_eq!(placed.order.discount_code.as_deref(), Some(code.id.as_str()));

        // Both rows are visible after commit
        let stored_code = db.discounts().get_by_id(&code.id).await.unwrap();
        assert!(stored_code.is_some());
        let stored_order = db.orders().get_by_id(&order_id).await.unwrap();
        assert!(stored_order.is_some());
    }

    #[tokio::test]
    async fn test_lines_snapshot_and_order() {
        let db = test_db().await;
        let policy = DiscountPolicy::new(5, 10).unwrap();
        let order_id = Uuid::new_v4().to_string();

        let priced = PricedOrder {
            lines: vec![
                PricedLine {
                    item_id: "item-a".to_string(),
                    name: "Toor Dal 1kg".to_string(),
                    unit_price_paise: 15_500,
                    quantity: 2,
                    line_total_paise: 31_000,
                },
                PricedLine {
                    item_id: "item-b".to_string(),
                    name: "Masala Chai 250g".to_string(),
                    unit_price_paise: 9_900,
                    quantity: 1,
                    line_total_paise: 9_900,
                },
            ],
            subtotal_paise: 40_900,
        };

        db.orders()
            .create_with_discount(&order_id, "u1", &priced, &policy)
            .await
            .unwrap();

        let lines = db.orders().get_lines(&order_id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_id, "item-a");
        assert_eq!(lines[0].name_snapshot, "Toor Dal 1kg");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].unit_price().paise(), 15_500);
        assert_eq!(lines[0].line_total().paise(), 31_000);
        assert_eq!(lines[1].item_id, "item-b");
    }

    #[tokio::test]
    async fn test_total_purchase_amount_zero_orders_is_zero() {
        let db = test_db().await;
        // Empty dataset is a valid zero total, not an error
        assert_eq!(db.orders().total_purchase_amount().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_total_purchase_amount_sums_after_discount() {
        let db = test_db().await;
        let policy = DiscountPolicy::new(2, 10).unwrap();

        db.orders()
            .create_with_discount(&Uuid::new_v4().to_string(), "u1", &priced(10_000), &policy)
            .await
            .unwrap();
        // Second order qualifies: 10% off 10_000
        db.orders()
            .create_with_discount(&Uuid::new_v4().to_string(), "u2", &priced(10_000), &policy)
            .await
            .unwrap();

        assert_eq!(
            db.orders().total_purchase_amount().await.unwrap(),
            10_000 + 9_000
        );
    }
}
