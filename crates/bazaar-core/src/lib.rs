//! # bazaar-core: Pure Business Logic for the Bazaar Order Service
//!
//! This crate is the **heart** of the order service. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bazaar Order Service                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 bazaar-orders (Service Layer)                   │   │
//! │  │    create_order, issue_code, validate_code, admin reports      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │   Item    │  │   Money   │  │ line calc │  │   rules   │  │   │
//! │  │   │   Order   │  │  (paise)  │  │ discounts │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Order, DiscountCode, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Order pricing and discount eligibility
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::money::Money;
//! use bazaar_core::types::DiscountPolicy;
//!
//! // Create money from paise (never from floats!)
//! let subtotal = Money::from_paise(50_000); // ₹500.00
//!
//! // Every 5th order gets 10% off
//! let policy = DiscountPolicy::new(5, 10).unwrap();
//!
//! assert_eq!(policy.discount_for(4, subtotal), None);
//! assert_eq!(policy.discount_for(5, subtotal), Some(Money::from_paise(5_000)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bazaar_core::Money` instead of
// `use bazaar_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{price_order, PricedLine, PricedOrder};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Discount applied to a qualifying Nth order, in whole percent.
///
/// Also the default for administratively issued codes when no explicit
/// percent is given.
pub const DEFAULT_DISCOUNT_PERCENT: u32 = 10;

/// Default discount period: every Nth order qualifies.
pub const DEFAULT_DISCOUNT_PERIOD: u32 = 5;

/// Maximum lines allowed in a single order.
///
/// ## Business Reason
/// Prevents runaway requests and keeps transactions a reasonable size.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single item in an order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
