//! # Repository Module
//!
//! Database repository implementations for the Bazaar order service.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service call                                                           │
//! │       │                                                                 │
//! │       │  db.items().get_catalog(&ids)                                   │
//! │       ▼                                                                 │
//! │  ItemRepository                                                         │
//! │  ├── get_catalog(&self, ids)                                            │
//! │  ├── record_purchase(&self, id, qty)                                    │
//! │  ├── insert(&self, item)                                                │
//! │  └── list_purchased(&self)                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                         │
//! │  • SQL is isolated in one place                                         │
//! │  • Conditional updates live next to the schema they guard               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Catalog reads, inventory updates
//! - [`order::OrderRepository`] - Transactional order creation, totals
//! - [`discount::DiscountRepository`] - Code storage and status transitions

pub mod discount;
pub mod item;
pub mod order;
