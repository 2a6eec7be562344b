//! Integration tests for the order-creation flow.

mod support;

use support::{seed_item, test_db, DownGateway, StaticGateway};

use bazaar_core::{CodeStatus, CoreError, DiscountPolicy, OrderLineRequest};
use bazaar_orders::{CheckoutService, OrderError, PaymentGateway};

fn line(item_id: &str, quantity: i64) -> OrderLineRequest {
    OrderLineRequest {
        item_id: item_id.to_string(),
        quantity,
    }
}

fn policy(period: u32) -> DiscountPolicy {
    DiscountPolicy::new(period, 10).unwrap()
}

#[tokio::test]
async fn create_order_prices_exclusively_from_catalog() {
    let db = test_db().await;
    let rice = seed_item(&db, "Basmati Rice 5kg", 45_000, 10).await;
    let dal = seed_item(&db, "Toor Dal 1kg", 15_500, 10).await;

    let service = CheckoutService::new(db.clone(), policy(5), StaticGateway);
    assert_eq!(service.policy().period(), 5);

    let receipt = service
        .create_order("user-1", &[line(&rice, 2), line(&dal, 3)])
        .await
        .unwrap();

    // Σ(catalog price × qty); the request cannot even carry a price
    assert_eq!(receipt.total_paise, 2 * 45_000 + 3 * 15_500);
    assert_eq!(receipt.discount_paise, 0);
    assert_eq!(receipt.invoice_id, format!("inv-{}", receipt.order_id));

    let order = db
        .orders()
        .get_by_id(&receipt.order_id)
        .await
        .unwrap()
        .expect("order persisted");
    assert_eq!(order.subtotal_paise, receipt.total_paise);
    assert_eq!(order.total_paise, order.subtotal_paise - order.discount_paise);

    let lines = db.orders().get_lines(&receipt.order_id).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].name_snapshot, "Basmati Rice 5kg");
    assert_eq!(lines[0].unit_price_paise, 45_000);
}

#[tokio::test]
async fn every_fifth_order_gets_ten_percent_off() {
    let db = test_db().await;
    let chai = seed_item(&db, "Masala Chai 250g", 10_000, 100).await;

    let service = CheckoutService::new(db.clone(), policy(5), StaticGateway);

    let mut receipts = Vec::new();
    for i in 0..10 {
        let receipt = service
            .create_order(&format!("user-{i}"), &[line(&chai, 1)])
            .await
            .unwrap();
        receipts.push(receipt);
    }

    // Orders #1-#4 carry no discount
    for receipt in &receipts[0..4] {
        assert_eq!(receipt.discount_paise, 0);
        assert_eq!(receipt.total_paise, 10_000);
    }

    // Order #5: 10% of its pre-discount total, with a fresh ACTIVE code
    let fifth = &receipts[4];
    assert_eq!(fifth.discount_paise, 1_000);
    assert_eq!(fifth.total_paise, 9_000);

    let order = db
        .orders()
        .get_by_id(&fifth.order_id)
        .await
        .unwrap()
        .unwrap();
    let code_id = order.discount_code.expect("qualifying order carries a code");
    let code = db.discounts().get_by_id(&code_id).await.unwrap().unwrap();
    assert_eq!(code.status, CodeStatus::Active);
    assert_eq!(code.discount_percent, 10);
    assert_eq!(code.discount_paise, Some(1_000));
    assert_eq!(code.order_id.as_deref(), Some(fifth.order_id.as_str()));

    // Orders #6-#9 back to zero, #10 discounted again
    assert_eq!(receipts[5].discount_paise, 0);
    assert_eq!(receipts[9].discount_paise, 1_000);
}

#[tokio::test]
async fn insufficient_stock_rejects_and_persists_nothing() {
    let db = test_db().await;
    let butter = seed_item(&db, "Amul Butter 500g", 27_500, 3).await;

    let service = CheckoutService::new(db.clone(), policy(5), StaticGateway);

    let err = service
        .create_order("user-1", &[line(&butter, 5)])
        .await
        .unwrap_err();

    match err {
        OrderError::Rejected(CoreError::InsufficientStock {
            name,
            available,
            requested,
        }) => {
            assert_eq!(name, "Amul Butter 500g");
            assert_eq!(available, 3);
            assert_eq!(requested, 5);
        }
        other => panic!("unexpected error: {other}"),
    }

    // No order record and no discount code survive the rejection
    assert_eq!(db.orders().count().await.unwrap(), 0);
    assert!(db.discounts().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_item_among_existing_reports_zero_available() {
    let db = test_db().await;
    let salt = seed_item(&db, "Tata Salt 1kg", 2_800, 50).await;

    let service = CheckoutService::new(db.clone(), policy(5), StaticGateway);

    let err = service
        .create_order("user-1", &[line(&salt, 1), line("no-such-item", 2)])
        .await
        .unwrap_err();

    match err {
        OrderError::Rejected(CoreError::InsufficientStock {
            name, available, ..
        }) => {
            assert_eq!(name, "no-such-item");
            assert_eq!(available, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(db.orders().count().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_items_only_is_items_not_found() {
    let db = test_db().await;
    let service = CheckoutService::new(db.clone(), policy(5), StaticGateway);

    let err = service
        .create_order("user-1", &[line("ghost-a", 1), line("ghost-b", 1)])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::Rejected(CoreError::ItemsNotFound)
    ));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn empty_or_malformed_requests_are_client_errors() {
    let db = test_db().await;
    let service = CheckoutService::new(db.clone(), policy(5), StaticGateway);

    let err = service.create_order("user-1", &[]).await.unwrap_err();
    assert!(matches!(err, OrderError::Rejected(_)));
    assert!(!err.is_retryable());

    let err = service
        .create_order("user-1", &[line("some-item", 0)])
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Rejected(_)));

    let err = service.create_order("", &[line("some-item", 1)]).await.unwrap_err();
    assert!(matches!(err, OrderError::Rejected(_)));

    assert_eq!(db.orders().count().await.unwrap(), 0);
}

#[tokio::test]
async fn invoice_failure_leaves_committed_order_and_distinct_error() {
    let db = test_db().await;
    let bread = seed_item(&db, "Britannia Bread", 4_500, 20).await;

    let service = CheckoutService::new(db.clone(), policy(5), DownGateway);

    let err = service
        .create_order("user-1", &[line(&bread, 2)])
        .await
        .unwrap_err();

    // Not "order creation failed": the order exists, payment isn't arranged
    let order_id = match &err {
        OrderError::InvoicePending { order_id, .. } => order_id.clone(),
        other => panic!("unexpected error: {other}"),
    };
    assert_eq!(err.committed_order(), Some(order_id.as_str()));
    assert!(!err.is_retryable());

    let order = db.orders().get_by_id(&order_id).await.unwrap();
    assert!(order.is_some(), "order committed despite invoice failure");
}

#[tokio::test]
async fn payment_follows_invoice() {
    let db = test_db().await;
    let milk = seed_item(&db, "Amul Milk 1L", 6_600, 30).await;

    let service = CheckoutService::new(db.clone(), policy(5), StaticGateway);
    let receipt = service
        .create_order("user-1", &[line(&milk, 1)])
        .await
        .unwrap();

    // The later payment step, outside the creation transaction
    let paid = StaticGateway
        .make_payment(&receipt.order_id, &receipt.invoice_id)
        .await
        .unwrap();
    assert!(paid);
}
