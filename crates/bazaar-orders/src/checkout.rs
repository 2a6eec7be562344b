//! # Checkout: Order Creation Orchestration
//!
//! The control-flow center of the service. One call validates a request,
//! prices it against the catalog, decides discount eligibility, persists the
//! order atomically, and obtains an invoice from the payment collaborator.
//!
//! ## The Flow
//! ```text
//! create_order(user_id, lines)
//!      │
//!      ├── 1. validate request shape          (bazaar-core, no store access)
//!      ├── 2. generate order uuid             (before any row exists)
//!      ├── 3. fetch catalog projection        (one query, exact ids)
//!      ├── 4. price lines, compute subtotal   (pure; catalog prices only)
//!      ├── 5. transactional persist           (seq_no → eligibility → code
//!      │                                       → order → lines, all-or-none)
//!      ├── 6. generate_invoice(order, total)  (external collaborator)
//!      │        └── failure here is InvoicePending, NOT a failed creation
//!      └── 7. return receipt
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::OrderError;
use crate::payment::PaymentGateway;
use bazaar_core::{pricing, validation, CoreError, DiscountPolicy, OrderLineRequest};
use bazaar_db::Database;

// =============================================================================
// Receipt
// =============================================================================

/// What the caller gets back from a successful order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,
    pub invoice_id: String,
    /// Order value after discount, in paise.
    pub total_paise: i64,
    /// Discount applied, in paise. Zero for non-qualifying orders.
    pub discount_paise: i64,
}

// =============================================================================
// Checkout Service
// =============================================================================

/// The order-creation orchestrator.
///
/// Generic over the payment collaborator so tests and deployments can inject
/// their own gateway.
#[derive(Debug, Clone)]
pub struct CheckoutService<P> {
    db: Database,
    policy: DiscountPolicy,
    payments: P,
}

impl<P: PaymentGateway> CheckoutService<P> {
    /// Creates a new checkout service.
    pub fn new(db: Database, policy: DiscountPolicy, payments: P) -> Self {
        CheckoutService {
            db,
            policy,
            payments,
        }
    }

    /// The active discount policy.
    pub fn policy(&self) -> DiscountPolicy {
        self.policy
    }

    /// Creates an order for `user_id` from the requested lines.
    ///
    /// ## Failure semantics
    /// - Validation and pricing failures reject the request before or
    ///   without committing anything ([`OrderError::Rejected`]).
    /// - Store failures roll the whole transaction back
    ///   ([`OrderError::Dependency`], retryable).
    /// - Once the order row is committed, an invoice failure surfaces as
    ///   [`OrderError::InvoicePending`]: the order exists, payment is not
    ///   yet arranged.
    pub async fn create_order(
        &self,
        user_id: &str,
        lines: &[OrderLineRequest],
    ) -> Result<OrderReceipt, OrderError> {
        validation::validate_user_id(user_id).map_err(CoreError::from)?;
        validation::validate_order_lines(lines)?;

        // The order id exists before any row does, so the discount code
        // issued in the same transaction can reference it.
        let order_id = Uuid::new_v4().to_string();

        debug!(order_id = %order_id, user_id = %user_id, lines = lines.len(), "Creating order");

        let ids: Vec<&str> = lines.iter().map(|l| l.item_id.as_str()).collect();
        let catalog = self.db.items().get_catalog(&ids).await?;

        let priced = match pricing::price_order(lines, &catalog) {
            Ok(priced) => priced,
            Err(e) => {
                warn!(order_id = %order_id, user_id = %user_id, error = %e, "Order rejected");
                return Err(e.into());
            }
        };

        let placed = self
            .db
            .orders()
            .create_with_discount(&order_id, user_id, &priced, &self.policy)
            .await?;

        info!(
            order_id = %placed.order.id,
            seq_no = %placed.order.seq_no,
            subtotal = %placed.order.subtotal_paise,
            discount = %placed.order.discount_paise,
            total = %placed.order.total_paise,
            code = placed.code.as_ref().map(|c| c.id.as_str()).unwrap_or("-"),
            "Order persisted"
        );

        let invoice_id = match self
            .payments
            .generate_invoice(&placed.order.id, placed.order.total())
            .await
        {
            Ok(invoice_id) => invoice_id,
            Err(source) => {
                // The order is committed; this is a payment-arrangement
                // failure, not a creation failure.
                error!(
                    order_id = %placed.order.id,
                    error = %source,
                    "Invoice request failed for committed order"
                );
                return Err(OrderError::InvoicePending {
                    order_id: placed.order.id,
                    source,
                });
            }
        };

        info!(order_id = %placed.order.id, invoice_id = %invoice_id, "Order created");

        Ok(OrderReceipt {
            order_id: placed.order.id,
            invoice_id,
            total_paise: placed.order.total_paise,
            discount_paise: placed.order.discount_paise,
        })
    }
}
