//! # Discount Code Repository
//!
//! Database operations for discount codes.
//!
//! ## Code Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Discount Code Lifecycle                             │
//! │                                                                         │
//! │  1. ISSUE                                                               │
//! │     ├── insert(code) → status: Active                                   │
//! │     └── (order-linked codes are written inside the order transaction)   │
//! │                                                                         │
//! │  2. VALIDATE (read-only, any number of times)                           │
//! │     └── get_by_id() → status inspected by the registry                  │
//! │                                                                         │
//! │  3. REDEEM (at most once)                                               │
//! │     └── mark_used() → conditional Active → Used                         │
//! │                                                                         │
//! │  4. (OPTIONAL) EXPIRE                                                   │
//! │     └── mark_expired() → conditional Active → Expired                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status transitions are conditional UPDATEs guarded on the current status,
//! so a code cannot be consumed twice even under race.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use bazaar_core::DiscountCode;

/// Inserts a discount code row on the given connection.
///
/// Shared between the standalone repository insert and the order-creation
/// transaction, which writes the code and the order atomically.
pub(crate) async fn insert_code(conn: &mut SqliteConnection, code: &DiscountCode) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO discount_codes (
            id, discount_percent, status, discount_paise, order_id, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&code.id)
    .bind(code.discount_percent)
    .bind(code.status)
    .bind(code.discount_paise)
    .bind(&code.order_id)
    .bind(code.created_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// Repository for discount-code database operations.
#[derive(Debug, Clone)]
pub struct DiscountRepository {
    pool: SqlitePool,
}

impl DiscountRepository {
    /// Creates a new DiscountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRepository { pool }
    }

    /// Inserts a discount code (standalone issuance path).
    pub async fn insert(&self, code: &DiscountCode) -> DbResult<()> {
        debug!(code = %code.id, percent = %code.discount_percent, "Inserting discount code");

        let mut conn = self.pool.acquire().await?;
        insert_code(&mut conn, code).await
    }

    /// Gets a code by its id (the code string).
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<DiscountCode>> {
        let code = sqlx::query_as::<_, DiscountCode>(
            r#"
            SELECT id, discount_percent, status, discount_paise, order_id, created_at
            FROM discount_codes
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(code)
    }

    /// Marks a code as used, only if it is currently active.
    ///
    /// ## Returns
    /// `true` when this call consumed the code; `false` when the code was
    /// missing or already non-active. The guard makes double-redeem
    /// impossible under race.
    pub async fn mark_used(&self, id: &str) -> DbResult<bool> {
        debug!(code = %id, "Marking discount code used");

        let result = sqlx::query(
            r#"
            UPDATE discount_codes SET status = 'used'
            WHERE id = ?1 AND status = 'active'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marks a code as expired, only if it is currently active.
    ///
    /// ## Returns
    /// `true` when this call retired the code.
    pub async fn mark_expired(&self, id: &str) -> DbResult<bool> {
        debug!(code = %id, "Marking discount code expired");

        let result = sqlx::query(
            r#"
            UPDATE discount_codes SET status = 'expired'
            WHERE id = ?1 AND status = 'active'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all codes in issuance order.
    pub async fn list(&self) -> DbResult<Vec<DiscountCode>> {
        let codes = sqlx::query_as::<_, DiscountCode>(
            r#"
            SELECT id, discount_percent, status, discount_paise, order_id, created_at
            FROM discount_codes
            ORDER BY created_at, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(codes)
    }

    /// Sums discount amounts over all codes.
    ///
    /// Codes without a concrete amount (admin-issued promotional codes)
    /// contribute nothing. Zero codes is a valid zero sum.
    pub async fn total_discount_amount(&self) -> DbResult<i64> {
        let total: Option<i64> =
            sqlx::query_scalar("SELECT SUM(discount_paise) FROM discount_codes")
                .fetch_one(&self.pool)
                .await?;

        Ok(total.unwrap_or(0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
