//! # Admin Aggregation
//!
//! Read-only reporting over orders and discount codes.
//!
//! ## Capability, Not Request Flags
//! Every operation takes an [`AdminCapability`] by typed parameter. The
//! upstream authorization collaborator verifies the caller's role and
//! constructs the capability; holding the value IS the authorization.
//! Nothing here inspects ambient request state.
//!
//! ## Zero Is a Number
//! The totals treat an empty dataset as a valid zero sum. `Err` from these
//! operations always means the aggregate query itself failed, so "no orders
//! yet" and "store unreachable" are different outcomes by type.

use serde::{Deserialize, Serialize};
use tracing::debug;

use bazaar_core::Money;
use bazaar_db::{Database, DbError};

// =============================================================================
// Capability
// =============================================================================

/// Proof of administrative access, issued by the upstream authorizer.
///
/// Deliberately opaque: the only things a holder can do with it are pass it
/// to report operations and read the actor name for audit logs.
#[derive(Debug, Clone)]
pub struct AdminCapability {
    actor: String,
}

impl AdminCapability {
    /// Mints a capability for a verified administrator.
    ///
    /// Callers are expected to have checked the role already; this type
    /// carries the decision, it does not make it.
    pub fn granted_to(actor: impl Into<String>) -> Self {
        AdminCapability {
            actor: actor.into(),
        }
    }

    /// The administrator this capability was granted to (for audit logs).
    pub fn actor(&self) -> &str {
        &self.actor
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// One row of the purchased-items report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedItemSummary {
    pub item_name: String,
    pub purchased_count: i64,
}

/// One row of the discount-code listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCodeSummary {
    pub code_id: String,
    pub discount_percent: u32,
    /// Absent on promotional codes issued without a concrete amount.
    pub discount_paise: Option<i64>,
}

// =============================================================================
// Reports
// =============================================================================

/// Capability-gated admin reports.
#[derive(Debug, Clone)]
pub struct AdminReports {
    db: Database,
}

impl AdminReports {
    /// Creates the report surface over the shared database.
    pub fn new(db: Database) -> Self {
        AdminReports { db }
    }

    /// Lists every active item with its purchase count, ordered by name.
    pub async fn list_items_purchased(
        &self,
        capability: &AdminCapability,
    ) -> Result<Vec<PurchasedItemSummary>, DbError> {
        debug!(actor = %capability.actor(), "Listing purchased items");

        let rows = self.db.items().list_purchased().await?;

        Ok(rows
            .into_iter()
            .map(|r| PurchasedItemSummary {
                item_name: r.name,
                purchased_count: r.purchased_count,
            })
            .collect())
    }

    /// Sums order totals (after discount) over all orders.
    ///
    /// Zero orders yields `Money::zero()`, not an error.
    pub async fn total_purchase_amount(
        &self,
        capability: &AdminCapability,
    ) -> Result<Money, DbError> {
        debug!(actor = %capability.actor(), "Computing total purchase amount");

        let total = self.db.orders().total_purchase_amount().await?;
        Ok(Money::from_paise(total))
    }

    /// Lists every discount code in issuance order.
    pub async fn list_discount_codes(
        &self,
        capability: &AdminCapability,
    ) -> Result<Vec<DiscountCodeSummary>, DbError> {
        debug!(actor = %capability.actor(), "Listing discount codes");

        let codes = self.db.discounts().list().await?;

        Ok(codes
            .into_iter()
            .map(|c| DiscountCodeSummary {
                code_id: c.id,
                discount_percent: c.discount_percent,
                discount_paise: c.discount_paise,
            })
            .collect())
    }

    /// Sums discount amounts over all discount codes.
    ///
    /// Zero codes yields `Money::zero()`, not an error.
    pub async fn total_discount_amount(
        &self,
        capability: &AdminCapability,
    ) -> Result<Money, DbError> {
        debug!(actor = %capability.actor(), "Computing total discount amount");

        let total = self.db.discounts().total_discount_amount().await?;
        Ok(Money::from_paise(total))
    }
}
