//! End-to-end flows against a real PostgreSQL instance.
//!
//! Opt-in: set DATABASE_URL and run `cargo test -- --ignored`. Each test
//! namespaces its rows with a random suffix so reruns against the same
//! database do not collide.

use std::path::PathBuf;
use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;

use server_core::common::{AppError, Role};
use server_core::domains::auth::{actions as auth_actions, JwtService};
use server_core::domains::catalog::actions as catalog_actions;
use server_core::domains::catalog::models::Product;
use server_core::domains::orders::actions as order_actions;
use server_core::domains::orders::models::{Order, OrderHistory, OrderStatus};
use server_core::domains::subscriptions::actions as subscription_actions;
use server_core::domains::users::models::User;
use server_core::kernel::{ConsoleOtpSender, ServerDeps};

async fn test_deps() -> ServerDeps {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    ServerDeps::new(
        pool,
        Arc::new(JwtService::new("test_secret", "test_issuer".to_string())),
        Arc::new(ConsoleOtpSender),
        vec![],
        PathBuf::from("/tmp/milkrun-test-uploads"),
    )
}

fn suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

async fn seed_customer(deps: &ServerDeps, sfx: &str) -> User {
    User::create(
        &format!("customer-{sfx}@example.com"),
        "Test Customer",
        Role::Customer,
        &deps.db_pool,
    )
    .await
    .expect("failed to seed customer")
}

async fn seed_product(deps: &ServerDeps, sfx: &str, price: i64, stock: i32) -> Product {
    catalog_actions::add_category(&format!("Dairy-{sfx}"), "Milk and cream", deps)
        .await
        .expect("failed to add category");

    catalog_actions::add_product(
        catalog_actions::NewProduct {
            name: &format!("Milk 1L {sfx}"),
            category_name: &format!("Dairy-{sfx}"),
            description: "Whole milk",
            price: Decimal::from(price),
            unit: "litre",
            stock,
            image_url: None,
        },
        deps,
    )
    .await
    .expect("failed to add product")
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_place_order_decrements_stock_and_prices_the_order() {
    let deps = test_deps().await;
    let sfx = suffix();

    let customer = seed_customer(&deps, &sfx).await;
    let product = seed_product(&deps, &sfx, 40, 50).await;

    let receipt = order_actions::place_order(customer.id, &product.name, 5, &deps)
        .await
        .expect("order should succeed");

    assert_eq!(receipt.total_amount, Decimal::from(200));
    assert_eq!(receipt.remaining_stock, 45);
    assert_eq!(receipt.status, OrderStatus::Pending);

    let order = Order::find_by_id(receipt.order_id, &deps.db_pool)
        .await
        .unwrap()
        .expect("order row should exist");
    assert_eq!(order.total_amount, Decimal::from(200));
    assert_eq!(order.quantity, 5);

    // A second order for more than the remaining stock fails and changes nothing.
    let err = order_actions::place_order(customer.id, &product.name, 50, &deps)
        .await
        .expect_err("oversized order should fail");
    assert!(matches!(err, AppError::InsufficientStock));

    let unchanged = Product::find_by_id(product.id, &deps.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.stock, 45);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_missing_product_is_not_found() {
    let deps = test_deps().await;
    let sfx = suffix();
    let customer = seed_customer(&deps, &sfx).await;

    let err = order_actions::place_order(customer.id, "No Such Product", 1, &deps)
        .await
        .expect_err("unknown product should fail");
    assert!(matches!(err, AppError::NotFound("Product")));
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_catalog_ids_increase_and_duplicates_conflict() {
    let deps = test_deps().await;
    let sfx = suffix();

    let first = catalog_actions::add_category(&format!("Fruit-{sfx}"), "", &deps)
        .await
        .unwrap();
    let second = catalog_actions::add_category(&format!("Veg-{sfx}"), "", &deps)
        .await
        .unwrap();
    assert!(second.id > first.id);

    let err = catalog_actions::add_category(&format!("Fruit-{sfx}"), "", &deps)
        .await
        .expect_err("duplicate category should fail");
    assert!(matches!(err, AppError::Conflict("Category")));
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_otp_flow_single_use_and_expiry() {
    let deps = test_deps().await;
    let sfx = suffix();
    let contact = format!("otp-{sfx}@example.com");

    // Unknown contact fails closed.
    let err = auth_actions::verify_code(&contact, "123456", &deps)
        .await
        .expect_err("unknown contact should fail");
    assert!(matches!(err, AppError::InvalidCredential));

    // Request a code; the user is registered on the spot as a customer.
    auth_actions::request_code(&contact, &deps).await.unwrap();
    let user = User::find_by_contact(&contact, &deps.db_pool)
        .await
        .unwrap()
        .expect("user should be auto-registered");
    assert_eq!(user.role, Role::Customer);
    let code = user.otp_code.clone().expect("code should be stored");

    // Wrong code fails and leaves the stored code usable.
    let err = auth_actions::verify_code(&contact, "000000", &deps)
        .await
        .expect_err("wrong code should fail");
    assert!(matches!(err, AppError::InvalidCredential));

    // Exact code succeeds and issues a verifiable token.
    let session = auth_actions::verify_code(&contact, &code, &deps)
        .await
        .expect("correct code should verify");
    let claims = deps.jwt_service.verify_token(&session.token).unwrap();
    assert_eq!(claims.user_id, user.id);

    // The code was cleared by the successful attempt.
    let err = auth_actions::verify_code(&contact, &code, &deps)
        .await
        .expect_err("replayed code should fail");
    assert!(matches!(err, AppError::InvalidCredential));

    // An expired code fails even when it matches.
    auth_actions::request_code(&contact, &deps).await.unwrap();
    let user = User::find_by_contact(&contact, &deps.db_pool)
        .await
        .unwrap()
        .unwrap();
    let code = user.otp_code.clone().unwrap();
    sqlx::query("UPDATE users SET otp_expires_at = now() - interval '1 minute' WHERE id = $1")
        .bind(user.id)
        .execute(&deps.db_pool)
        .await
        .unwrap();
    let err = auth_actions::verify_code(&contact, &code, &deps)
        .await
        .expect_err("expired code should fail");
    assert!(matches!(err, AppError::InvalidCredential));
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_duplicate_subscription_leaves_no_side_effects() {
    let deps = test_deps().await;
    let sfx = suffix();

    let customer = seed_customer(&deps, &sfx).await;
    let product = seed_product(&deps, &sfx, 25, 30).await;

    let starts_on = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let ends_on = chrono::NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();

    let receipt = subscription_actions::subscribe(
        customer.id,
        &product.name,
        2,
        starts_on,
        ends_on,
        &deps,
    )
    .await
    .expect("first subscription should succeed");
    assert_eq!(receipt.remaining_stock, 28);

    let orders_before = Order::find_by_customer(customer.id, None, &deps.db_pool)
        .await
        .unwrap()
        .len();

    // Duplicate is rejected before any stock or order side effect.
    let err = subscription_actions::subscribe(
        customer.id,
        &product.name,
        2,
        starts_on,
        ends_on,
        &deps,
    )
    .await
    .expect_err("duplicate subscription should fail");
    assert!(matches!(err, AppError::Conflict("Subscription")));

    let stock_after = Product::find_by_id(product.id, &deps.db_pool)
        .await
        .unwrap()
        .unwrap()
        .stock;
    assert_eq!(stock_after, 28, "rejected duplicate must not consume stock");

    let orders_after = Order::find_by_customer(customer.id, None, &deps.db_pool)
        .await
        .unwrap()
        .len();
    assert_eq!(
        orders_after, orders_before,
        "rejected duplicate must not leave an orphan order"
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_delivered_orders_move_to_history() {
    let deps = test_deps().await;
    let sfx = suffix();

    let customer = seed_customer(&deps, &sfx).await;
    let product = seed_product(&deps, &sfx, 10, 20).await;

    let receipt = order_actions::place_order(customer.id, &product.name, 3, &deps)
        .await
        .unwrap();

    // Unknown status string is rejected outright.
    let err = order_actions::update_order_status(
        customer.id,
        Role::Customer,
        receipt.order_id,
        "shipped",
        &deps,
    )
    .await
    .expect_err("status outside the closed set should fail");
    assert!(matches!(err, AppError::InvalidArgument(_)));

    order_actions::update_order_status(
        customer.id,
        Role::Customer,
        receipt.order_id,
        "Delivered",
        &deps,
    )
    .await
    .expect("delivery transition should succeed");

    // Gone from the active store, present in the archive.
    let active = Order::find_by_id(receipt.order_id, &deps.db_pool)
        .await
        .unwrap();
    assert!(active.is_none());

    let archived = OrderHistory::find_by_id(receipt.order_id, &deps.db_pool)
        .await
        .unwrap()
        .expect("archived row should exist");
    assert_eq!(archived.status, OrderStatus::Delivered);
    assert_eq!(archived.quantity, 3);
}
