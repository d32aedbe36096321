//! Checkout route handlers.
//!
//! The shipping form posts to `/checkout/confirm`. A valid submission places
//! the order, empties the session cart and renders the confirmation page
//! directly; nothing about the order is kept afterwards.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use modesta_core::{CITIES, CheckoutError, Order, ShippingForm};

use super::LayoutView;
use super::cart::{CartItemView, CartView, load_cart, save_cart, set_flash};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session::Flash;

/// Shipping form values echoed back into the inputs.
#[derive(Clone, Default)]
pub struct ShippingFormView {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub email: String,
}

impl From<&ShippingForm> for ShippingFormView {
    fn from(form: &ShippingForm) -> Self {
        Self {
            name: form.name.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            city: form.city.clone().unwrap_or_default(),
            email: form.email.clone().unwrap_or_default(),
        }
    }
}

/// One entry of the city dropdown.
#[derive(Clone)]
pub struct CityOption {
    pub name: &'static str,
    pub selected: bool,
}

fn city_options(selected: &str) -> Vec<CityOption> {
    CITIES
        .iter()
        .map(|&name| CityOption {
            name,
            selected: name == selected,
        })
        .collect()
}

/// Placed order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub number: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: Option<String>,
    pub email: Option<String>,
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number.to_string(),
            name: order.shipping.name.clone(),
            phone: order.shipping.phone.clone(),
            address: order.shipping.address.clone(),
            city: order.shipping.city.clone(),
            email: order.shipping.email.clone(),
            items: order.items.iter().map(CartItemView::from).collect(),
            total: order.total.to_string(),
            item_count: order.item_count,
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub layout: LayoutView,
    pub cart: CartView,
    pub cities: Vec<CityOption>,
    pub form: ShippingFormView,
    pub error: Option<String>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub layout: LayoutView,
    pub order: OrderView,
}

async fn redirect_empty_cart(session: &Session) -> Result<Response> {
    set_flash(session, Flash::notice("Your cart is empty")).await?;
    Ok(Redirect::to("/cart").into_response())
}

/// Display the shipping form with an order summary.
///
/// An empty cart sends the shopper back to the cart page.
#[instrument(skip(session, nonce))]
pub async fn show(session: Session, nonce: CspNonce) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return redirect_empty_cart(&session).await;
    }

    Ok(CheckoutTemplate {
        layout: LayoutView::load(&session, nonce).await?,
        cart: CartView::from(&cart),
        cities: city_options(""),
        form: ShippingFormView::default(),
        error: None,
    }
    .into_response())
}

/// Place the order from the shipping form.
///
/// Missing required fields re-render the form with a 400 and the shopper's
/// input preserved.
#[instrument(skip(session, nonce, form))]
pub async fn confirm(
    session: Session,
    nonce: CspNonce,
    Form(form): Form<ShippingForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;

    let shipping = match form.validate() {
        Ok(shipping) => shipping,
        Err(err) => {
            if cart.is_empty() {
                return redirect_empty_cart(&session).await;
            }
            tracing::info!(error = %err, "Checkout form rejected");
            let page = CheckoutTemplate {
                layout: LayoutView::load(&session, nonce).await?,
                cart: CartView::from(&cart),
                cities: city_options(form.city.as_deref().unwrap_or_default()),
                form: ShippingFormView::from(&form),
                error: Some(err.to_string()),
            };
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let order = match Order::place(shipping, &mut cart) {
        Ok(order) => order,
        Err(CheckoutError::CartEmpty) => return redirect_empty_cart(&session).await,
        Err(err) => return Err(err.into()),
    };
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_id", order.number.as_str())]),
    );
    tracing::info!(
        order_id = %order.number,
        customer = %order.shipping.name,
        items = order.item_count,
        total = %order.total,
        "Order placed"
    );

    Ok(ConfirmationTemplate {
        layout: LayoutView::load(&session, nonce).await?,
        order: OrderView::from(&order),
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modesta_core::{Cart, Catalog};

    #[test]
    fn test_order_view_carries_receipt_fields() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(&catalog.products()[0], 2);
        let shipping = ShippingForm {
            name: "Amina".to_string(),
            phone: "0100".to_string(),
            address: "12 Nile St".to_string(),
            city: Some("Giza".to_string()),
            email: None,
        }
        .validate()
        .unwrap_or_else(|err| panic!("valid form rejected: {err}"));

        let order = Order::place(shipping, &mut cart)
            .unwrap_or_else(|err| panic!("order refused: {err}"));
        let view = OrderView::from(&order);

        assert!(view.number.starts_with("MOD-"));
        assert_eq!(view.total, "900 EGP");
        assert_eq!(view.item_count, 2);
        assert_eq!(view.city.as_deref(), Some("Giza"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_city_options_mark_selection() {
        let options = city_options("Giza");
        assert_eq!(options.len(), 4);
        let selected: Vec<&str> = options.iter().filter(|c| c.selected).map(|c| c.name).collect();
        assert_eq!(selected, vec!["Giza"]);
        assert!(city_options("").iter().all(|c| !c.selected));
    }

    #[test]
    fn test_form_view_echoes_input() {
        let form = ShippingForm {
            name: "  Sara ".to_string(),
            city: None,
            ..ShippingForm::default()
        };
        let view = ShippingFormView::from(&form);
        assert_eq!(view.name, "  Sara ");
        assert!(view.city.is_empty());
    }
}
