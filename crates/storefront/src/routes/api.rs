//! JSON checkout endpoint.
//!
//! Stateless: the request carries its own items, so the session cart is
//! neither read nor cleared. Success and failure both answer with a small
//! JSON object carrying a `status` field.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use modesta_core::{Cart, Catalog, CheckoutError, Order, ProductId, ShippingForm};

use crate::error::add_breadcrumb;
use crate::state::AppState;

/// One requested line.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiOrderItem {
    pub product_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

/// Order submitted to the JSON endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiOrder {
    #[serde(flatten)]
    pub shipping: ShippingForm,
    #[serde(default)]
    pub items: Vec<ApiOrderItem>,
}

/// Response body for the JSON endpoint.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckoutResponse {
    fn success(order_id: String) -> Self {
        Self {
            status: "success",
            order_id: Some(order_id),
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            order_id: None,
            message: Some(message.into()),
        }
    }
}

/// Build a cart from requested lines.
///
/// Unknown product ids and non-positive quantities are skipped.
fn cart_from_items(catalog: &Catalog, items: &[ApiOrderItem]) -> Cart {
    let mut cart = Cart::new();
    for item in items {
        let Ok(quantity) = u32::try_from(item.quantity) else {
            continue;
        };
        match catalog.find(ProductId::new(item.product_id)) {
            Some(product) => cart.add(product, quantity),
            None => tracing::debug!(product_id = item.product_id, "Skipping unknown product"),
        }
    }
    cart
}

/// Place an order from a JSON body.
///
/// Answers `200 {"status":"success","order_id":"MOD-NNNNN"}`, or
/// `400 {"status":"error","message":...}` for an unreadable body, blank
/// required fields, or no orderable items.
#[instrument(skip(state, payload))]
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<ApiOrder>, JsonRejection>,
) -> (StatusCode, Json<CheckoutResponse>) {
    let order = match payload {
        Ok(Json(order)) => order,
        Err(rejection) => {
            tracing::info!(error = %rejection.body_text(), "Unreadable checkout body");
            return (
                StatusCode::BAD_REQUEST,
                Json(CheckoutResponse::error(rejection.body_text())),
            );
        }
    };

    match place(state.catalog(), &order) {
        Ok(placed) => {
            add_breadcrumb(
                "checkout",
                "API order placed",
                Some(&[("order_id", placed.number.as_str())]),
            );
            tracing::info!(
                order_id = %placed.number,
                customer = %placed.shipping.name,
                items = placed.item_count,
                total = %placed.total,
                "Order placed"
            );
            (
                StatusCode::OK,
                Json(CheckoutResponse::success(placed.number.to_string())),
            )
        }
        Err(err) => {
            tracing::info!(error = %err, "API checkout rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(CheckoutResponse::error(err.to_string())),
            )
        }
    }
}

fn place(catalog: &Catalog, order: &ApiOrder) -> Result<Order, CheckoutError> {
    let shipping = order.shipping.validate()?;
    let mut cart = cart_from_items(catalog, &order.items);
    Order::place(shipping, &mut cart)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn order(items: Vec<ApiOrderItem>) -> ApiOrder {
        ApiOrder {
            shipping: ShippingForm {
                name: "Amina".to_string(),
                phone: "0100".to_string(),
                address: "12 Nile St".to_string(),
                city: None,
                email: None,
            },
            items,
        }
    }

    #[test]
    fn test_cart_from_items_skips_unknown_and_non_positive() {
        let catalog = Catalog::seeded();
        let items = vec![
            ApiOrderItem { product_id: 1, quantity: 2 },
            ApiOrderItem { product_id: 99, quantity: 1 },
            ApiOrderItem { product_id: 2, quantity: 0 },
            ApiOrderItem { product_id: 3, quantity: -4 },
        ];
        let cart = cart_from_items(&catalog, &items);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_place_requires_an_orderable_item() {
        let catalog = Catalog::seeded();
        let err = place(&catalog, &order(vec![ApiOrderItem { product_id: 99, quantity: 1 }]))
            .unwrap_err();
        assert_eq!(err, CheckoutError::CartEmpty);
    }

    #[test]
    fn test_place_returns_name_derived_number() {
        let catalog = Catalog::seeded();
        let placed = place(&catalog, &order(vec![ApiOrderItem { product_id: 1, quantity: 1 }]))
            .unwrap();
        assert_eq!(
            placed.number,
            modesta_core::OrderNumber::from_customer_name("Amina")
        );
    }

    #[test]
    fn test_api_order_defaults_quantity() {
        let body = r#"{"name":"A","phone":"1","address":"x","items":[{"product_id":5}]}"#;
        let parsed: ApiOrder = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.items[0].quantity, 1);
        assert_eq!(parsed.shipping.city, None);
    }

    #[test]
    fn test_response_shape() {
        let ok = serde_json::to_value(CheckoutResponse::success("MOD-00042".to_string())).unwrap();
        assert_eq!(ok, serde_json::json!({"status": "success", "order_id": "MOD-00042"}));

        let err = serde_json::to_value(CheckoutResponse::error("your cart is empty")).unwrap();
        assert_eq!(err, serde_json::json!({"status": "error", "message": "your cart is empty"}));
    }
}
