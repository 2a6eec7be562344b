//! # Discount Code Registry
//!
//! Issues and validates discount codes.
//!
//! Order-linked codes are written by the order-creation transaction itself
//! (so a failed order never leaves an orphan code); this registry is the
//! standalone surface: administrative issuance, validation, redemption.
//!
//! ## Degradation Rule
//! `validate_code` never fails. A malformed code, an unknown code, a
//! non-active code, and a storage failure during lookup all produce the
//! same `valid: false` answer, because an invalid code must not abort the
//! surrounding order flow - the flow just proceeds with no discount.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::RegistryError;
use bazaar_core::{validation, CodeStatus, DiscountCode, DEFAULT_DISCOUNT_PERCENT};
use bazaar_db::Database;

// =============================================================================
// Validation Outcome
// =============================================================================

/// The answer to "can this code be applied?". Always an answer, never an
/// error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeValidation {
    pub valid_code: bool,
    /// Present only when the code is valid.
    pub discount_percent: Option<u32>,
}

impl CodeValidation {
    fn invalid() -> Self {
        CodeValidation {
            valid_code: false,
            discount_percent: None,
        }
    }

    fn valid(percent: u32) -> Self {
        CodeValidation {
            valid_code: true,
            discount_percent: Some(percent),
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// The discount-code registry.
#[derive(Debug, Clone)]
pub struct DiscountRegistry {
    db: Database,
}

impl DiscountRegistry {
    /// Creates a new registry over the shared database.
    pub fn new(db: Database) -> Self {
        DiscountRegistry { db }
    }

    /// Issues a new ACTIVE code and returns its identifier (the code string).
    ///
    /// ## Arguments
    /// * `percent` - Percentage reduction; defaults to 10 when absent
    ///   (administrative issuance without an order context)
    /// * `order_id` - The order whose creation earned this code, if any
    /// * `discount_paise` - The concrete amount, when known
    pub async fn issue_code(
        &self,
        percent: Option<u32>,
        order_id: Option<&str>,
        discount_paise: Option<i64>,
    ) -> Result<String, RegistryError> {
        let percent = percent.unwrap_or(DEFAULT_DISCOUNT_PERCENT);
        validation::validate_discount_percent(percent)?;

        let code = DiscountCode {
            id: Uuid::new_v4().to_string(),
            discount_percent: percent,
            status: CodeStatus::Active,
            discount_paise,
            order_id: order_id.map(str::to_string),
            created_at: Utc::now(),
        };

        self.db.discounts().insert(&code).await?;

        info!(code = %code.id, percent = percent, order_id = order_id.unwrap_or("-"), "Discount code issued");

        Ok(code.id)
    }

    /// Checks whether a code can currently be applied.
    ///
    /// Read-only and idempotent: validating a code any number of times
    /// returns the same answer and changes nothing. Consumption is a
    /// separate, explicit step ([`Self::redeem_code`]).
    pub async fn validate_code(&self, code: &str) -> CodeValidation {
        // Malformed codes don't merit a store lookup
        if validation::validate_uuid(code).is_err() {
            debug!(code = %code, "Malformed discount code");
            return CodeValidation::invalid();
        }

        match self.db.discounts().get_by_id(code).await {
            Ok(Some(found)) if found.status == CodeStatus::Active => {
                CodeValidation::valid(found.discount_percent)
            }
            Ok(_) => CodeValidation::invalid(),
            Err(e) => {
                // Lookup failure degrades to "invalid" instead of propagating:
                // the surrounding order flow continues with no discount.
                warn!(code = %code, error = %e, "Discount lookup failed; treating code as invalid");
                CodeValidation::invalid()
            }
        }
    }

    /// Consumes a code: ACTIVE → USED, at most once.
    ///
    /// ## Returns
    /// `true` when this call consumed the code; `false` when it was unknown
    /// or already non-active.
    pub async fn redeem_code(&self, code: &str) -> Result<bool, RegistryError> {
        let consumed = self.db.discounts().mark_used(code).await?;

        if consumed {
            info!(code = %code, "Discount code redeemed");
        } else {
            debug!(code = %code, "Redeem found no active code");
        }

        Ok(consumed)
    }

    /// Retires a code administratively: ACTIVE → EXPIRED.
    ///
    /// ## Returns
    /// `true` when this call retired the code.
    pub async fn expire_code(&self, code: &str) -> Result<bool, RegistryError> {
        let expired = self.db.discounts().mark_expired(code).await?;

        if expired {
            info!(code = %code, "Discount code expired");
        }

        Ok(expired)
    }
}
