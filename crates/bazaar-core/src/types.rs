//! # Domain Types
//!
//! Core domain types used throughout the Bazaar order service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      Order      │   │  DiscountCode   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id = the code  │       │
//! │  │  name           │   │  seq_no         │   │  percent        │       │
//! │  │  price_paise    │   │  subtotal/total │   │  status         │       │
//! │  │  available_qty  │   │  discount_paise │   │  order_id?      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogEntry   │   │   OrderStatus   │   │   CodeStatus    │       │
//! │  │  pricing        │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  projection     │   │  Created        │   │  Active         │       │
//! │  └─────────────────┘   └─────────────────┘   │  Used / Expired │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A catalog item available for purchase.
///
/// The order core only ever reads items; stock mutation is the inventory
/// collaborator's conditional `record_purchase` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to buyers and in admin reports.
    pub name: String,

    /// Unit price in paise (smallest currency unit).
    pub price_paise: i64,

    /// Units currently available for sale. Never negative.
    pub available_qty: i64,

    /// Total units ever purchased. Monotonic non-decreasing.
    pub purchased_count: i64,

    /// Whether the item is active (soft delete).
    pub is_active: bool,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Checks whether the requested quantity can currently be fulfilled.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.available_qty >= quantity
    }
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// The projection of an [`Item`] used during order pricing.
///
/// Order creation fetches exactly these columns in one query; nothing else
/// about an item matters for the transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub price_paise: i64,
    pub available_qty: i64,
}

impl CatalogEntry {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Order creation only ever produces `Created`; the rest of the lifecycle
/// (fulfilment, shipping, returns) belongs to other systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been validated, priced, and persisted.
    #[default]
    Created,
}

// =============================================================================
// Discount Code Status
// =============================================================================

/// Lifecycle states of a discount code. Closed set.
///
/// Created `Active` → consumed by exactly one redemption (`Used`), or retired
/// administratively (`Expired`). A non-Active code never validates again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum CodeStatus {
    /// Code can be validated and redeemed.
    Active,
    /// Code has been consumed by a redemption.
    Used,
    /// Code was retired without being used.
    Expired,
}

// =============================================================================
// Discount Code
// =============================================================================

/// A discount code entitling a percentage price reduction.
///
/// The `id` doubles as the human-facing code string. Codes are created only
/// by the internal issuance path, never from untrusted input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DiscountCode {
    pub id: String,

    /// Percentage reduction, 0-100.
    pub discount_percent: u32,

    pub status: CodeStatus,

    /// Concrete amount in paise, set when the code was issued for a specific
    /// order. Absent on administratively issued promotional codes.
    pub discount_paise: Option<i64>,

    /// The order whose creation earned this code, when there is one.
    pub order_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl DiscountCode {
    /// Returns the concrete discount amount as Money, if known.
    #[inline]
    pub fn discount(&self) -> Option<Money> {
        self.discount_paise.map(Money::from_paise)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A persisted order record.
///
/// Created exactly once per successful transaction and never mutated by this
/// service afterwards. Invariant: `total_paise = subtotal_paise -
/// discount_paise`, and `discount_paise` is zero unless `seq_no` landed on a
/// qualifying position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,

    /// Position of this order among all orders, assigned atomically at
    /// insert time. The discount-eligibility signal.
    pub seq_no: i64,

    /// Order value before discount, in paise.
    pub subtotal_paise: i64,

    /// Discount applied, in paise. Zero for non-qualifying orders.
    pub discount_paise: i64,

    /// Order value after discount, in paise.
    pub total_paise: i64,

    /// The discount code issued for this order, when it qualified.
    pub discount_code: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the pre-discount value as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    /// Returns the post-discount value as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze item data at time of purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: String,
    pub order_id: String,
    pub item_id: String,
    /// Item name at time of purchase (frozen).
    pub name_snapshot: String,
    /// Unit price in paise at time of purchase (frozen).
    pub unit_price_paise: i64,
    /// Quantity purchased.
    pub quantity: i64,
    /// Line total (unit_price × quantity).
    pub line_total_paise: i64,
    pub created_at: DateTime<Utc>,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise)
    }
}

// =============================================================================
// Order Line Request
// =============================================================================

/// One requested line of an incoming order.
///
/// Deliberately carries NO price field: pricing comes exclusively from the
/// catalog, so a client-supplied price cannot exist, let alone be trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub item_id: String,
    pub quantity: i64,
}

// =============================================================================
// Discount Policy
// =============================================================================

/// The periodic-discount rule: every Nth order gets `percent` off.
///
/// Orders are 1-indexed by `seq_no`, so with period 5 the qualifying
/// positions are 5, 10, 15, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    period: u32,
    percent: u32,
}

impl DiscountPolicy {
    /// Creates a policy. Period must be positive, percent 0-100.
    pub fn new(period: u32, percent: u32) -> Result<Self, ValidationError> {
        if period == 0 {
            return Err(ValidationError::MustBePositive {
                field: "discount period".to_string(),
            });
        }
        if percent > 100 {
            return Err(ValidationError::OutOfRange {
                field: "discount percent".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(DiscountPolicy { period, percent })
    }

    /// The configured period N.
    #[inline]
    pub const fn period(&self) -> u32 {
        self.period
    }

    /// The configured discount percent.
    #[inline]
    pub const fn percent(&self) -> u32 {
        self.percent
    }

    /// Returns the discount amount for the order at position `seq_no`, or
    /// `None` when the position does not qualify.
    pub fn discount_for(&self, seq_no: i64, subtotal: Money) -> Option<Money> {
        if seq_no > 0 && seq_no % self.period as i64 == 0 {
            Some(subtotal.percent_of(self.percent))
        } else {
            None
        }
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        DiscountPolicy {
            period: crate::DEFAULT_DISCOUNT_PERIOD,
            percent: crate::DEFAULT_DISCOUNT_PERCENT,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Created);
    }

    #[test]
    fn test_item_can_fulfill() {
        let item = Item {
            id: "i".to_string(),
            name: "Toor Dal 1kg".to_string(),
            price_paise: 15_500,
            available_qty: 3,
            purchased_count: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(item.can_fulfill(3));
        assert!(!item.can_fulfill(4));
    }

    #[test]
    fn test_discount_policy_bounds() {
        assert!(DiscountPolicy::new(0, 10).is_err());
        assert!(DiscountPolicy::new(5, 101).is_err());
        assert!(DiscountPolicy::new(1, 0).is_ok());
        assert!(DiscountPolicy::new(5, 100).is_ok());
    }

    #[test]
    fn test_discount_policy_every_fifth() {
        let policy = DiscountPolicy::new(5, 10).unwrap();
        let subtotal = Money::from_paise(10_000);

        for seq in 1..=4 {
            assert_eq!(policy.discount_for(seq, subtotal), None);
        }
        assert_eq!(
            policy.discount_for(5, subtotal),
            Some(Money::from_paise(1_000))
        );
        assert_eq!(policy.discount_for(6, subtotal), None);
        assert_eq!(
            policy.discount_for(10, subtotal),
            Some(Money::from_paise(1_000))
        );
    }

    #[test]
    fn test_discount_policy_period_one() {
        // Every order qualifies
        let policy = DiscountPolicy::new(1, 10).unwrap();
        assert!(policy.discount_for(1, Money::from_paise(100)).is_some());
        assert!(policy.discount_for(2, Money::from_paise(100)).is_some());
    }

    #[test]
    fn test_order_invariant_helpers() {
        let order = Order {
            id: "o".to_string(),
            user_id: "u".to_string(),
            status: OrderStatus::Created,
            seq_no: 5,
            subtotal_paise: 10_000,
            discount_paise: 1_000,
            total_paise: 9_000,
            discount_code: Some("code".to_string()),
            created_at: Utc::now(),
        };

        assert_eq!(order.subtotal() - order.total(), Money::from_paise(1_000));
    }
}
