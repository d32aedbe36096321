//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (optional ?category= filter)
//! GET  /category/{name}        - Category page
//! GET  /health                 - Health check
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (redirects back)
//! POST /cart/update            - Set a line's quantity
//! POST /cart/adjust            - Change a line's quantity by a delta
//! POST /cart/remove            - Remove a line
//! GET  /cart/count             - Cart count as JSON
//!
//! # Checkout
//! GET  /checkout               - Shipping form and order summary
//! POST /checkout/confirm       - Place the order (form), render confirmation
//! POST /checkout               - Place an order (JSON API)
//! POST /api/checkout           - Same as POST /checkout
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::CspNonce;
use crate::models::session::Flash;
use crate::state::AppState;

/// Page chrome shared by every full-page template.
#[derive(Clone)]
pub struct LayoutView {
    /// Units in the cart, shown on the header badge.
    pub cart_count: u32,
    /// Pending one-shot notice.
    pub flash: Option<Flash>,
    /// CSP nonce for the inline script.
    pub nonce: String,
}

impl LayoutView {
    /// Build the layout for the current session, consuming any flash notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(session: &Session, nonce: CspNonce) -> Result<Self> {
        let cart = cart::load_cart(session).await?;
        let flash = cart::take_flash(session).await?;
        Ok(Self {
            cart_count: cart.count(),
            flash,
            nonce: nonce.0,
        })
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/adjust", post(cart::adjust))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(api::checkout))
        .route("/confirm", post(checkout::confirm))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page and category browsing
        .route("/", get(home::home))
        .route("/category/{name}", get(home::category))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout: HTML flow and JSON API
        .nest("/checkout", checkout_routes())
        .route("/api/checkout", post(api::checkout))
}
