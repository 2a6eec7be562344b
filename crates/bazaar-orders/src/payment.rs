//! # Payment Collaborator Boundary
//!
//! The payment/invoice subsystem is external to this service; this module
//! specifies its contract and nothing else. Implementations are injected
//! into [`crate::checkout::CheckoutService`].
//!
//! Calls are expected to complete or fail within a bounded time. This
//! service never retries them; retry policy belongs to the collaborator or
//! an upstream caller.

use async_trait::async_trait;
use thiserror::Error;

use bazaar_core::Money;

/// Failures of the payment collaborator.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The collaborator could not be reached or did not answer in time.
    #[error("payment collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered and declined the request.
    #[error("invoice request rejected: {0}")]
    Rejected(String),
}

/// Contract of the external payment/invoice subsystem.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Requests an invoice for the given order and post-discount amount.
    ///
    /// Returns the collaborator's invoice identifier.
    async fn generate_invoice(&self, order_id: &str, amount: Money)
        -> Result<String, PaymentError>;

    /// Requests payment against a previously generated invoice.
    ///
    /// Consumed by later steps outside the order-creation transaction;
    /// returns whether the payment succeeded.
    async fn make_payment(&self, order_id: &str, invoice_id: &str)
        -> Result<bool, PaymentError>;
}
