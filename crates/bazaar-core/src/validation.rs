//! # Validation Module
//!
//! Input validation for order-service requests.
//!
//! Runs before any store access: a request that fails here is rejected as a
//! client error without touching the catalog or the order store.
//!
//! ## Usage
//! ```rust
//! use bazaar_core::types::OrderLineRequest;
//! use bazaar_core::validation::{validate_order_lines, validate_user_id};
//!
//! validate_user_id("user-42").unwrap();
//!
//! let lines = vec![OrderLineRequest { item_id: "item-1".to_string(), quantity: 2 }];
//! validate_order_lines(&lines).unwrap();
//! ```

use crate::error::{CoreError, ValidationError};
use crate::types::OrderLineRequest;
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a buyer's user id.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_user_id(user_id: &str) -> ValidationResult<()> {
    let user_id = user_id.trim();

    if user_id.is_empty() {
        return Err(ValidationError::Required {
            field: "user_id".to_string(),
        });
    }

    if user_id.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "user_id".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_discount_percent(percent: u32) -> ValidationResult<()> {
    if percent > 100 {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the shape of a requested order.
///
/// ## Rules
/// - At least one line
/// - At most MAX_ORDER_LINES lines
/// - Every line names an item and a valid quantity
///
/// ## User Workflow
/// ```text
/// create_order(user, lines)
///      │
///      ▼
/// validate_order_lines(lines) ← THIS FUNCTION
///      │
///      ├── empty?            → Error: "items is required"
///      ├── > 100 lines?      → Error: "order cannot have more than 100 lines"
///      ├── blank item id?    → Error: "item_id is required"
///      ├── qty <= 0 or >999? → Error from validate_quantity
///      │
///      └── OK → fetch catalog, price, persist
/// ```
pub fn validate_order_lines(lines: &[OrderLineRequest]) -> Result<(), CoreError> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        }
        .into());
    }

    if lines.len() > MAX_ORDER_LINES {
        return Err(CoreError::TooManyLines {
            max: MAX_ORDER_LINES,
        });
    }

    for line in lines {
        if line.item_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "item_id".to_string(),
            }
            .into());
        }
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// Used by code validation to short-circuit malformed codes without a
/// store lookup.
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, qty: i64) -> OrderLineRequest {
        OrderLineRequest {
            item_id: id.to_string(),
            quantity: qty,
        }
    }

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id("user-42").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("   ").is_err());
        assert!(validate_user_id(&"u".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(0).is_ok());
        assert!(validate_discount_percent(10).is_ok());
        assert!(validate_discount_percent(100).is_ok());
        assert!(validate_discount_percent(101).is_err());
    }

    #[test]
    fn test_validate_order_lines() {
        assert!(validate_order_lines(&[line("a", 1)]).is_ok());

        // Empty list is a client error before any store access
        assert!(validate_order_lines(&[]).is_err());

        // Blank item id
        assert!(validate_order_lines(&[line("  ", 1)]).is_err());

        // Bad quantity inside an otherwise fine list
        assert!(validate_order_lines(&[line("a", 1), line("b", 0)]).is_err());

        // Too many lines
        let many: Vec<_> = (0..=MAX_ORDER_LINES).map(|i| line(&format!("i{i}"), 1)).collect();
        assert!(matches!(
            validate_order_lines(&many),
            Err(CoreError::TooManyLines { .. })
        ));
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
