//! Screen state machine for an in-process storefront.
//!
//! A [`ShopSession`] owns one cart and the current [`Screen`]. Front ends feed
//! it named [`Action`]s and render whatever screen it lands on; they never
//! touch the cart directly.
//!
//! ```text
//! Home ──Browse──▶ Category ──ViewCart──▶ Cart ──ProceedToCheckout──▶ Checkout
//!   ▲                                                                    │
//!   └──────────ContinueShopping─── Confirmation ◀──────PlaceOrder────────┘
//! ```
//!
//! `GoHome`, `Browse` and `ViewCart` are available from every screen.

use std::sync::Arc;

use crate::cart::{Cart, LineChange};
use crate::catalog::Catalog;
use crate::checkout::{CheckoutError, Order, ShippingForm};
use crate::product::Product;
use crate::types::{Category, ProductId};

/// Where the shopper currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Category(Category),
    Cart,
    Checkout,
    Confirmation(Box<Order>),
}

impl Screen {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Category(_) => "category",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Confirmation(_) => "confirmation",
        }
    }
}

/// Something the shopper asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GoHome,
    Browse(Category),
    AddToCart {
        product_id: ProductId,
        quantity: u32,
    },
    ViewCart,
    SetQuantity {
        product_id: ProductId,
        quantity: i64,
    },
    AdjustQuantity {
        product_id: ProductId,
        delta: i64,
    },
    RemoveItem(ProductId),
    ProceedToCheckout,
    PlaceOrder(ShippingForm),
    ContinueShopping,
}

impl Action {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GoHome => "go home",
            Self::Browse(_) => "browse",
            Self::AddToCart { .. } => "add to cart",
            Self::ViewCart => "view cart",
            Self::SetQuantity { .. } => "set quantity",
            Self::AdjustQuantity { .. } => "adjust quantity",
            Self::RemoveItem(_) => "remove item",
            Self::ProceedToCheckout => "proceed to checkout",
            Self::PlaceOrder(_) => "place order",
            Self::ContinueShopping => "continue shopping",
        }
    }
}

/// The result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The session moved to a different screen.
    Navigated,
    /// Units were added; carries the product name and the new cart count.
    Added { name: String, count: u32 },
    /// An add asked for zero units. Nothing changed.
    InvalidQuantity,
    /// A cart line changed.
    LineChanged(ProductId, LineChange),
    /// The action named a product the catalog does not carry. Nothing changed.
    UnknownProduct(ProductId),
    /// The order went through; the session now shows the confirmation.
    OrderPlaced,
}

/// Errors from [`ShopSession::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The action does not apply to the current screen.
    #[error("cannot {action} from the {screen} screen")]
    Unavailable {
        action: &'static str,
        screen: &'static str,
    },
    /// Checkout refused the submission; the session stays where it was.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// One shopper's session: a cart, a screen and a shared catalog.
#[derive(Debug, Clone)]
pub struct ShopSession {
    catalog: Arc<Catalog>,
    cart: Cart,
    screen: Screen,
}

impl ShopSession {
    /// Start a session on the home screen with an empty cart.
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            screen: Screen::Home,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Products visible on the current screen.
    ///
    /// Home shows the full catalog, a category screen its own products, and
    /// every other screen none.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        match &self.screen {
            Screen::Home => self.catalog.products().iter().collect(),
            Screen::Category(category) => self.catalog.in_category(*category),
            _ => Vec::new(),
        }
    }

    /// Apply an action.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Unavailable`] when the action does not apply to
    /// the current screen, and [`FlowError::Checkout`] when an order cannot
    /// be placed. The session is unchanged on error.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, FlowError> {
        match action {
            Action::GoHome => Ok(self.navigate(Screen::Home)),
            Action::Browse(category) => Ok(self.navigate(Screen::Category(category))),
            Action::ViewCart => Ok(self.navigate(Screen::Cart)),
            Action::AddToCart {
                product_id,
                quantity,
            } => {
                self.require(
                    matches!(self.screen, Screen::Home | Screen::Category(_)),
                    "add to cart",
                )?;
                if quantity == 0 {
                    return Ok(Outcome::InvalidQuantity);
                }
                let Some(product) = self.catalog.find(product_id) else {
                    return Ok(Outcome::UnknownProduct(product_id));
                };
                self.cart.add(product, quantity);
                Ok(Outcome::Added {
                    name: product.name.clone(),
                    count: self.cart.count(),
                })
            }
            Action::SetQuantity {
                product_id,
                quantity,
            } => {
                self.require(self.screen == Screen::Cart, "set quantity")?;
                let change = self.cart.set_quantity(product_id, quantity);
                Ok(Outcome::LineChanged(product_id, change))
            }
            Action::AdjustQuantity { product_id, delta } => {
                self.require(self.screen == Screen::Cart, "adjust quantity")?;
                let change = self.cart.adjust_quantity(product_id, delta);
                Ok(Outcome::LineChanged(product_id, change))
            }
            Action::RemoveItem(product_id) => {
                self.require(self.screen == Screen::Cart, "remove item")?;
                let change = if self.cart.remove(product_id) {
                    LineChange::Removed
                } else {
                    LineChange::Missing
                };
                Ok(Outcome::LineChanged(product_id, change))
            }
            Action::ProceedToCheckout => {
                self.require(self.screen == Screen::Cart, "proceed to checkout")?;
                if self.cart.is_empty() {
                    return Err(CheckoutError::CartEmpty.into());
                }
                Ok(self.navigate(Screen::Checkout))
            }
            Action::PlaceOrder(form) => {
                self.require(self.screen == Screen::Checkout, "place order")?;
                let shipping = form.validate()?;
                let order = Order::place(shipping, &mut self.cart)?;
                self.screen = Screen::Confirmation(Box::new(order));
                Ok(Outcome::OrderPlaced)
            }
            Action::ContinueShopping => {
                self.require(
                    matches!(self.screen, Screen::Confirmation(_)),
                    "continue shopping",
                )?;
                Ok(self.navigate(Screen::Home))
            }
        }
    }

    fn navigate(&mut self, screen: Screen) -> Outcome {
        self.screen = screen;
        Outcome::Navigated
    }

    fn require(&self, allowed: bool, action: &'static str) -> Result<(), FlowError> {
        if allowed {
            Ok(())
        } else {
            Err(FlowError::Unavailable {
                action,
                screen: self.screen.name(),
            })
        }
    }
}
