//! Integration tests for the product catalog API.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The storefront server running (cargo run -p orchard-storefront)
//!
//! Run with: cargo test -p orchard-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use orchard_integration_tests::TestContext;

async fn search(ctx: &TestContext, term: &str, page: &str) -> Value {
    let resp = ctx
        .client
        .get(format!(
            "{}/api/products?q={term}&page={page}",
            ctx.base_url
        ))
        .send()
        .await
        .expect("Failed to search products");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse search results")
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_pagination_across_thirteen_products() {
    let ctx = TestContext::new().await;

    // A unique marker scopes the search to this test's rows
    let marker = format!("mk{}", Uuid::new_v4().simple());
    for i in 0..13 {
        ctx.seed_product(&format!("{marker} item {i}"), "pagination fixture", 500)
            .await;
    }

    // Page 1: full page of 12, two pages total
    let page1 = search(&ctx, &marker, "1").await;
    assert_eq!(page1["products"].as_array().expect("array").len(), 12);
    assert_eq!(page1["totalPages"], 2);
    assert_eq!(page1["page"], 1);

    // Page 2: the remaining one
    let page2 = search(&ctx, &marker, "2").await;
    assert_eq!(page2["products"].as_array().expect("array").len(), 1);

    // Past the end: empty list, not an error
    let page3 = search(&ctx, &marker, "3").await;
    assert_eq!(page3["products"].as_array().expect("array").len(), 0);
    assert_eq!(page3["totalPages"], 2);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_search_matches_name_or_description_case_insensitive() {
    let ctx = TestContext::new().await;

    let marker = format!("mk{}", Uuid::new_v4().simple());
    let by_name = ctx
        .seed_product(&format!("{marker} Walnut Bowl"), "hand turned", 4500)
        .await;
    let by_description = ctx
        .seed_product("Cedar Box", &format!("{marker} keepsake box"), 3800)
        .await;

    // Uppercased term still matches both rows (OR over name/description)
    let results = search(&ctx, &marker.to_uppercase(), "1").await;
    let ids: Vec<&str> = results["products"]
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["id"].as_str().expect("id"))
        .collect();
    assert!(ids.contains(&by_name.as_str()));
    assert!(ids.contains(&by_description.as_str()));
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_newest_products_come_first() {
    let ctx = TestContext::new().await;

    let marker = format!("mk{}", Uuid::new_v4().simple());
    let older = ctx.seed_product(&format!("{marker} older"), "", 100).await;
    let newer = ctx.seed_product(&format!("{marker} newer"), "", 100).await;

    let results = search(&ctx, &marker, "1").await;
    let ids: Vec<&str> = results["products"]
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["id"].as_str().expect("id"))
        .collect();
    let older_pos = ids.iter().position(|id| *id == older).expect("older row");
    let newer_pos = ids.iter().position(|id| *id == newer).expect("newer row");
    assert!(newer_pos < older_pos);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_product_detail() {
    let ctx = TestContext::new().await;
    let id = ctx
        .seed_product("Stoneware Vase", "wheel thrown", 5600)
        .await;

    let resp = ctx
        .client
        .get(format!("{}/api/products/{id}", ctx.base_url))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::OK);

    let product: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(product["id"], id.as_str());
    assert_eq!(product["name"], "Stoneware Vase");
    assert_eq!(product["price"], "56.00");
    assert!(product["imageUrl"].as_str().expect("imageUrl").contains(&id));
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_missing_product_is_404() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(format!("{}/api/products/p-missing", ctx.base_url))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
