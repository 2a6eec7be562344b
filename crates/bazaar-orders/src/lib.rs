//! # bazaar-orders: Order Service Layer
//!
//! The control-flow center of the Bazaar order service. This crate wires the
//! pure rules in `bazaar-core` and the repositories in `bazaar-db` into the
//! three operations the system exposes:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        bazaar-orders                                    │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │ CheckoutService  │  │ DiscountRegistry │  │   AdminReports   │      │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────  │      │
//! │  │  create_order    │  │  issue_code      │  │  purchased items │      │
//! │  │                  │  │  validate_code   │  │  purchase total  │      │
//! │  │                  │  │  redeem_code     │  │  code listing    │      │
//! │  │                  │  │  expire_code     │  │  discount total  │      │
//! │  └────────┬─────────┘  └──────────────────┘  └──────────────────┘      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  PaymentGateway (trait) ──► external invoice/payment collaborator       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`checkout`] - Order-creation orchestration
//! - [`registry`] - Discount-code issuance, validation, redemption
//! - [`admin`] - Capability-gated aggregation reports
//! - [`payment`] - The payment collaborator boundary trait
//! - [`config`] - Environment-driven service configuration
//! - [`error`] - Service-level error kinds

pub mod admin;
pub mod checkout;
pub mod config;
pub mod error;
pub mod payment;
pub mod registry;

pub use admin::{AdminCapability, AdminReports, DiscountCodeSummary, PurchasedItemSummary};
pub use checkout::{CheckoutService, OrderReceipt};
pub use config::{ConfigError, OrdersConfig};
pub use error::{OrderError, RegistryError};
pub use payment::{PaymentError, PaymentGateway};
pub use registry::{CodeValidation, DiscountRegistry};
