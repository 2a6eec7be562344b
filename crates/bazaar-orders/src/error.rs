//! # Service Error Types
//!
//! What callers of the order service see when an operation fails.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Failure Kinds at the Boundary                      │
//! │                                                                         │
//! │  Rejected        Client-correctable. Bad input, unknown items,          │
//! │                  insufficient stock. Retrying the same request          │
//! │                  will fail the same way.                                │
//! │                                                                         │
//! │  Dependency      Infrastructure. Catalog, order store, or discount      │
//! │                  registry unavailable. The whole transaction rolled     │
//! │                  back, so retrying is safe.                             │
//! │                                                                         │
//! │  InvoicePending  The order COMMITTED but the invoice call failed.       │
//! │                  The order exists; payment is not yet arranged. Must    │
//! │                  NOT be reported as "order creation failed" and must    │
//! │                  NOT be blindly retried as a new order.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tagged variants instead of exceptions-as-control-flow: "stock
//! insufficient" and "database unreachable" are different types of fact, and
//! the caller can tell them apart without string matching.

use thiserror::Error;

use crate::payment::PaymentError;
use bazaar_core::{CoreError, ValidationError};
use bazaar_db::DbError;

// =============================================================================
// Order Error
// =============================================================================

/// Failures of the order-creation flow.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The request was understood and turned down by a business rule.
    ///
    /// Carries the specific rejection (empty item list, unknown items,
    /// insufficient stock with the item name and available quantity).
    #[error("order rejected: {0}")]
    Rejected(#[from] CoreError),

    /// A store the transaction depends on failed. Nothing was committed;
    /// the whole request is safe to retry upstream.
    #[error("dependency failure: {0}")]
    Dependency(#[from] DbError),

    /// The order transaction committed, but the invoice request to the
    /// payment collaborator failed afterwards.
    ///
    /// The order exists; payment is not yet arranged. Surfaced distinctly so
    /// upstream cannot mistake it for a failed creation.
    #[error("order {order_id} was created but no invoice could be obtained: {source}")]
    InvoicePending {
        order_id: String,
        #[source]
        source: PaymentError,
    },
}

impl OrderError {
    /// Whether re-running the whole request is safe and potentially useful.
    ///
    /// Only dependency failures qualify: rejections will repeat, and an
    /// order with a pending invoice already exists.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Dependency(_))
    }

    /// The id of the order that was committed despite the failure, if any.
    pub fn committed_order(&self) -> Option<&str> {
        match self {
            OrderError::InvoicePending { order_id, .. } => Some(order_id),
            _ => None,
        }
    }
}

// =============================================================================
// Registry Error
// =============================================================================

/// Failures of discount-code issuance and redemption.
///
/// Code *validation* deliberately has no error type: an unreadable or
/// unknown code is a normal `valid: false` outcome (see
/// [`crate::registry::DiscountRegistry::validate_code`]).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Bad issuance request (percent outside 0-100).
    #[error("invalid discount code request: {0}")]
    Invalid(#[from] ValidationError),

    /// The code store is unavailable. Fatal to any order transaction that
    /// depends on issuance.
    #[error("discount store unavailable: {0}")]
    Store(#[from] DbError),
}

// =============================================================================
// Unit Tests
// =============================================================================
