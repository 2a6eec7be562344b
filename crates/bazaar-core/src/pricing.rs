//! # Order Pricing
//!
//! Pure pricing of a requested order against the current catalog.
//!
//! ## Where This Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Creation Data Flow                            │
//! │                                                                         │
//! │  Request lines: [{itemId, qty}, ...]     (no prices - by construction)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bazaar-db: one query → Vec<CatalogEntry>                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  price_order(lines, catalog) ← THIS MODULE (pure, no I/O)               │
//! │       │                                                                 │
//! │       ├── catalog empty?        → CoreError::ItemsNotFound              │
//! │       ├── line without row?     → CoreError::InsufficientStock (avl 0)  │
//! │       ├── qty > available?      → CoreError::InsufficientStock          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricedOrder { lines with frozen prices, subtotal }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices come exclusively from the catalog rows. The request type has no
//! price field, so a client-supplied price cannot reach this computation.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogEntry, OrderLineRequest};

// =============================================================================
// Priced Order
// =============================================================================

/// One priced line: the requested quantity with the catalog price frozen in.
#[derive(Debug, Clone, Serialize)]
pub struct PricedLine {
    pub item_id: String,
    /// Item name at pricing time, carried into the order-line snapshot.
    pub name: String,
    pub unit_price_paise: i64,
    pub quantity: i64,
    pub line_total_paise: i64,
}

impl PricedLine {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise)
    }
}

/// A fully priced order, ready to persist.
#[derive(Debug, Clone, Serialize)]
pub struct PricedOrder {
    /// Priced lines in request order.
    pub lines: Vec<PricedLine>,
    /// Σ(price × qty) over all lines, before any discount.
    pub subtotal_paise: i64,
}

impl PricedOrder {
    /// Returns the pre-discount subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Prices the requested lines against the fetched catalog rows.
///
/// ## Contract
/// - `catalog` is the result of the single projection query for exactly the
///   requested item ids; an empty result means none of the items exist.
/// - A line whose item has no catalog row is reported as insufficient stock
///   with `available: 0`, so the client sees the item named either way.
/// - Quantities must already be validated positive (see
///   [`crate::validation::validate_order_lines`]).
///
/// ## Example
/// ```rust
/// use bazaar_core::pricing::price_order;
/// use bazaar_core::types::{CatalogEntry, OrderLineRequest};
///
/// let catalog = vec![CatalogEntry {
///     id: "item-1".to_string(),
///     name: "Masala Chai 250g".to_string(),
///     price_paise: 9_900,
///     available_qty: 10,
/// }];
/// let lines = vec![OrderLineRequest { item_id: "item-1".to_string(), quantity: 2 }];
///
/// let priced = price_order(&lines, &catalog).unwrap();
/// assert_eq!(priced.subtotal_paise, 19_800);
/// ```
pub fn price_order(
    lines: &[OrderLineRequest],
    catalog: &[CatalogEntry],
) -> CoreResult<PricedOrder> {
    if catalog.is_empty() {
        return Err(CoreError::ItemsNotFound);
    }

    let mut priced = Vec::with_capacity(lines.len());
    let mut subtotal = Money::zero();

    for line in lines {
        let entry = match catalog.iter().find(|c| c.id == line.item_id) {
            Some(entry) => entry,
            None => {
                return Err(CoreError::InsufficientStock {
                    name: line.item_id.clone(),
                    available: 0,
                    requested: line.quantity,
                })
            }
        };

        if entry.available_qty < line.quantity {
            return Err(CoreError::InsufficientStock {
                name: entry.name.clone(),
                available: entry.available_qty,
                requested: line.quantity,
            });
        }

        let line_total = entry.price().multiply_quantity(line.quantity);
        subtotal += line_total;

        priced.push(PricedLine {
            item_id: entry.id.clone(),
            name: entry.name.clone(),
            unit_price_paise: entry.price_paise,
            quantity: line.quantity,
            line_total_paise: line_total.paise(),
        });
    }

    Ok(PricedOrder {
        lines: priced,
        subtotal_paise: subtotal.paise(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
