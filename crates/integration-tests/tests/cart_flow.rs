//! Cart mutations through the HTML forms.

use axum::http::StatusCode;
use modesta_integration_tests::TestClient;

async fn cart_count(client: &mut TestClient) -> u64 {
    let resp = client.get("/cart/count").await;
    assert_eq!(resp.status, StatusCode::OK);
    resp.json()["count"].as_u64().unwrap_or(u64::MAX)
}

#[tokio::test]
async fn test_new_session_has_empty_cart() {
    let mut client = TestClient::new();
    assert_eq!(cart_count(&mut client).await, 0);

    let resp = client.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_add_redirects_back_and_flashes_once() {
    let mut client = TestClient::new();

    let resp = client
        .post_form("/cart/add", "product_id=1&quantity=3&return_to=%2F%3Fcategory%3DAbayas")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/?category=Abayas"));
    assert_eq!(cart_count(&mut client).await, 3);

    let resp = client.get("/?category=Abayas").await;
    assert!(resp.body.contains("Added Classic Black Abaya to cart!"));
    assert!(resp.body.contains("id=\"cart-count\">3<"));

    let resp = client.get("/").await;
    assert!(!resp.body.contains("Added Classic Black Abaya to cart!"));
}

#[tokio::test]
async fn test_item_counts_are_pluralized() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=9").await;

    let resp = client.get("/cart").await;
    assert!(resp.body.contains("<p>1 item</p>"));

    client.post_form("/cart/add", "product_id=9").await;
    let resp = client.get("/cart").await;
    assert!(resp.body.contains("<p>2 items</p>"));

    let resp = client.get("/").await;
    assert!(resp.body.contains("class=\"category-card__count\">3 items</span>"));
}

#[tokio::test]
async fn test_add_merges_lines_and_totals() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=1&quantity=2").await;
    client.post_form("/cart/add", "product_id=1").await;
    client.post_form("/cart/add", "product_id=10&quantity=2").await;

    assert_eq!(cart_count(&mut client).await, 5);

    let resp = client.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body.matches("class=\"cart-line\"").count(), 2);
    // 450 * 3 + 45 * 2
    assert!(resp.body.contains("1350 EGP"));
    assert!(resp.body.contains("90 EGP"));
    assert!(resp.body.contains("1440 EGP"));
}

#[tokio::test]
async fn test_add_ignores_unknown_product_and_foreign_redirects() {
    let mut client = TestClient::new();

    let resp = client
        .post_form("/cart/add", "product_id=999&return_to=%2F%2Fevil.example")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));
    assert_eq!(cart_count(&mut client).await, 0);
}

#[tokio::test]
async fn test_backslash_redirect_stays_on_site() {
    let mut client = TestClient::new();

    let resp = client
        .post_form("/cart/add", "product_id=1&return_to=%2F%5Cevil.example")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));
    assert_eq!(cart_count(&mut client).await, 1);
}

#[tokio::test]
async fn test_zero_quantity_add_is_refused() {
    let mut client = TestClient::new();

    let resp = client
        .post_form("/cart/add", "product_id=1&quantity=0&return_to=%2F")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));
    assert_eq!(cart_count(&mut client).await, 0);

    let resp = client.get("/").await;
    assert!(resp.body.contains("Please enter a valid quantity"));
    assert!(!resp.body.contains("Added Classic Black Abaya to cart!"));
}

#[tokio::test]
async fn test_update_adjust_and_remove() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=4&quantity=2").await;
    client.post_form("/cart/add", "product_id=7").await;

    let resp = client.post_form("/cart/update", "product_id=4&quantity=5").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));
    assert_eq!(cart_count(&mut client).await, 6);

    client.post_form("/cart/adjust", "product_id=4&delta=-2").await;
    assert_eq!(cart_count(&mut client).await, 4);

    client.post_form("/cart/adjust", "product_id=7&delta=1").await;
    assert_eq!(cart_count(&mut client).await, 5);

    // Dropping to zero removes the line
    client.post_form("/cart/adjust", "product_id=7&delta=-2").await;
    assert_eq!(cart_count(&mut client).await, 3);
    let resp = client.get("/cart").await;
    assert!(resp.body.contains("Item removed from cart"));
    assert!(!resp.body.contains("Saudi Niqab"));

    client.post_form("/cart/update", "product_id=4&quantity=0").await;
    assert_eq!(cart_count(&mut client).await, 0);

    client.post_form("/cart/add", "product_id=2").await;
    client.post_form("/cart/remove", "product_id=2").await;
    assert_eq!(cart_count(&mut client).await, 0);
}

#[tokio::test]
async fn test_edits_to_missing_lines_change_nothing() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=3").await;

    client.post_form("/cart/update", "product_id=5&quantity=4").await;
    client.post_form("/cart/adjust", "product_id=5&delta=1").await;
    client.post_form("/cart/remove", "product_id=5").await;

    assert_eq!(cart_count(&mut client).await, 1);
}

#[tokio::test]
async fn test_sessions_do_not_share_carts() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=1&quantity=2").await;
    assert_eq!(cart_count(&mut client).await, 2);

    client.clear_cookies();
    assert_eq!(cart_count(&mut client).await, 0);
}
