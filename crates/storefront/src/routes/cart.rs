//! Cart route handlers.
//!
//! The cart is stored whole in the session. Every mutation is a plain form
//! POST that redirects, so the cart page works without JavaScript.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, Json, extract::State, response::Redirect};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use modesta_core::{Cart, CartItem, LineChange, ProductId};

use super::LayoutView;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session::Flash;
use crate::models::session_keys;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub name_ar: String,
    pub image_url: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.as_i32(),
            name: item.product.name.clone(),
            name_ar: item.product.name_ar.clone(),
            image_url: item.product.image_url.clone(),
            quantity: item.quantity,
            price: item.product.price.to_string(),
            line_price: item.line_total().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the shopper's cart, or an empty one for a new session.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the shopper's cart.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Remove and return the pending flash notice.
pub(crate) async fn take_flash(session: &Session) -> Result<Option<Flash>> {
    Ok(session.remove::<Flash>(session_keys::FLASH).await?)
}

/// Queue a flash notice for the next rendered page.
pub(crate) async fn set_flash(session: &Session, flash: Flash) -> Result<()> {
    session.insert(session_keys::FLASH, flash).await?;
    Ok(())
}

/// Only same-site paths are accepted as redirect targets.
///
/// Browsers read `//host` and `/\host` as protocol-relative, so a second
/// character of `/` or `\` is refused along with anything not rooted at `/`.
fn local_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if is_local(path) => path,
        _ => "/cart",
    }
}

fn is_local(path: &str) -> bool {
    let mut chars = path.chars();
    chars.next() == Some('/') && !matches!(chars.next(), Some('/' | '\\'))
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub quantity: Option<u32>,
    /// Page to go back to after adding.
    pub return_to: Option<String>,
}

/// Set-quantity form data. Zero or below removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: i64,
}

/// `+`/`-` button form data.
#[derive(Debug, Deserialize)]
pub struct AdjustCartForm {
    pub product_id: i32,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart count response.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: LayoutView,
    pub cart: CartView,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session, nonce))]
pub async fn show(session: Session, nonce: CspNonce) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartShowTemplate {
        layout: LayoutView::load(&session, nonce).await?,
        cart: CartView::from(&cart),
    })
}

/// Add item to cart.
///
/// Unknown product ids are ignored and a zero quantity is refused with a
/// notice. The shopper is sent back to the page the form came from.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let target = local_path(form.return_to.as_deref()).to_owned();
    let product_id = ProductId::new(form.product_id);

    let Some(product) = state.catalog().find(product_id) else {
        tracing::warn!(%product_id, "Add to cart for unknown product");
        return Ok(Redirect::to(&target));
    };

    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        set_flash(&session, Flash::notice("Please enter a valid quantity")).await?;
        return Ok(Redirect::to(&target));
    }

    let mut cart = load_cart(&session).await?;
    cart.add(product, quantity);
    save_cart(&session, &cart).await?;

    let id = product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
    tracing::info!(%product_id, count = cart.count(), "Added to cart");

    set_flash(&session, Flash::success(format!("Added {} to cart!", product.name))).await?;
    Ok(Redirect::to(&target))
}

/// Set a line's quantity.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    let change = cart.set_quantity(ProductId::new(form.product_id), form.quantity);
    apply_change(&session, &cart, change).await?;
    Ok(Redirect::to("/cart"))
}

/// Change a line's quantity by a delta.
#[instrument(skip(session))]
pub async fn adjust(session: Session, Form(form): Form<AdjustCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    let change = cart.adjust_quantity(ProductId::new(form.product_id), form.delta);
    apply_change(&session, &cart, change).await?;
    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    if cart.remove(ProductId::new(form.product_id)) {
        save_cart(&session, &cart).await?;
        set_flash(&session, Flash::notice("Item removed from cart")).await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Get cart item count as JSON.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCount {
        count: cart.count(),
    }))
}

async fn apply_change(session: &Session, cart: &Cart, change: LineChange) -> Result<()> {
    match change {
        LineChange::Missing => Ok(()),
        LineChange::Updated(_) => save_cart(session, cart).await,
        LineChange::Removed => {
            save_cart(session, cart).await?;
            set_flash(session, Flash::notice("Item removed from cart")).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modesta_core::Catalog;

    #[test]
    fn test_local_path_rejects_external_targets() {
        assert_eq!(local_path(Some("/?category=Niqabs")), "/?category=Niqabs");
        assert_eq!(local_path(Some("/category/Abayas")), "/category/Abayas");
        assert_eq!(local_path(Some("/")), "/");
        assert_eq!(local_path(Some("//evil.example")), "/cart");
        assert_eq!(local_path(Some("/\\evil.example")), "/cart");
        assert_eq!(local_path(Some("\\\\evil.example")), "/cart");
        assert_eq!(local_path(Some("https://evil.example")), "/cart");
        assert_eq!(local_path(None), "/cart");
    }

    #[test]
    fn test_cart_view_formats_totals() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(&catalog.products()[0], 3);

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "1350 EGP");
        assert_eq!(view.items[0].price, "450 EGP");
        assert_eq!(view.items[0].line_price, "1350 EGP");
    }
}
