//! Shared fixtures for the service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use bazaar_core::{Item, Money};
use bazaar_db::{Database, DbConfig};
use bazaar_orders::{PaymentError, PaymentGateway};

/// Fresh isolated in-memory database with migrations applied.
pub async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// Inserts a catalog item and returns its id.
pub async fn seed_item(db: &Database, name: &str, price_paise: i64, available_qty: i64) -> String {
    let now = Utc::now();
    let item = Item {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        price_paise,
        available_qty,
        purchased_count: 0,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.items().insert(&item).await.unwrap();
    item.id
}

/// Gateway that answers deterministically: invoice id derived from order id.
pub struct StaticGateway;

#[async_trait]
impl PaymentGateway for StaticGateway {
    async fn generate_invoice(
        &self,
        order_id: &str,
        _amount: Money,
    ) -> Result<String, PaymentError> {
        Ok(format!("inv-{order_id}"))
    }

    async fn make_payment(&self, _order_id: &str, _invoice_id: &str) -> Result<bool, PaymentError> {
        Ok(true)
    }
}

/// Gateway whose invoice call always fails.
pub struct DownGateway;

#[async_trait]
impl PaymentGateway for DownGateway {
    async fn generate_invoice(
        &self,
        _order_id: &str,
        _amount: Money,
    ) -> Result<String, PaymentError> {
        Err(PaymentError::Unavailable("invoice service down".to_string()))
    }

    async fn make_payment(&self, _order_id: &str, _invoice_id: &str) -> Result<bool, PaymentError> {
        Err(PaymentError::Unavailable("invoice service down".to_string()))
    }
}
