//! Interactive terminal storefront.
//!
//! Reads one command per line and drives a [`ShopSession`]. After every
//! navigation the current screen is redrawn; other actions print a one-line
//! notice. `place` prompts for the shipping fields on the following lines.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

use modesta_core::{
    Action, CITIES, Cart, Catalog, LineChange, Order, Outcome, Product, ProductId, Screen,
    ShippingForm, ShopSession, UnknownCategory,
};

use super::catalog::{category, product_line};

const HELP: &str = "\
Commands:
  home                 Show all products
  browse <category>    Show one category (Abayas, Khimars, Niqabs, Accessories)
  add <id> [qty]       Add a product to the cart (home or category screen)
  cart                 Show the cart
  set <id> <qty>       Set a cart line's quantity (0 removes it)
  + <id> / - <id>      Add or take one unit
  adjust <id> <delta>  Change a cart line's quantity by a delta
  remove <id>          Remove a cart line
  checkout             Go to checkout (cart screen)
  place                Enter shipping details and place the order
  continue             Back to shopping after an order
  help                 Show this help
  quit                 Leave the shop";

/// Problems with a typed command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("not a number: {0}")]
    InvalidNumber(String),
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    /// Prompt for shipping details, then place the order.
    Place,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns an [`InputError`] for unknown commands and bad arguments.
pub fn parse(line: &str) -> Result<Option<Command>, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "home" | "h" => Command::Act(Action::GoHome),
        "browse" | "b" => {
            let name = required(&mut words, "browse", "a category")?;
            Command::Act(Action::Browse(category(name)?))
        }
        "add" | "a" => {
            let product_id = number(required(&mut words, "add", "a product id")?)?;
            let quantity = words.next().map(number).transpose()?.unwrap_or(1);
            Command::Act(Action::AddToCart {
                product_id: ProductId::new(product_id),
                quantity,
            })
        }
        "cart" | "c" => Command::Act(Action::ViewCart),
        "set" => {
            let product_id = number(required(&mut words, "set", "a product id")?)?;
            let quantity = number(required(&mut words, "set", "a quantity")?)?;
            Command::Act(Action::SetQuantity {
                product_id: ProductId::new(product_id),
                quantity,
            })
        }
        "+" | "-" => {
            let product_id = number(required(&mut words, "+/-", "a product id")?)?;
            Command::Act(Action::AdjustQuantity {
                product_id: ProductId::new(product_id),
                delta: if head == "+" { 1 } else { -1 },
            })
        }
        "adjust" => {
            let product_id = number(required(&mut words, "adjust", "a product id")?)?;
            let delta = number(required(&mut words, "adjust", "a delta")?)?;
            Command::Act(Action::AdjustQuantity {
                product_id: ProductId::new(product_id),
                delta,
            })
        }
        "remove" | "rm" => {
            let product_id = number(required(&mut words, "remove", "a product id")?)?;
            Command::Act(Action::RemoveItem(ProductId::new(product_id)))
        }
        "checkout" => Command::Act(Action::ProceedToCheckout),
        "place" => Command::Place,
        "continue" => Command::Act(Action::ContinueShopping),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(InputError::UnknownCommand(head.to_owned())),
    };
    Ok(Some(command))
}

fn required<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, InputError> {
    words
        .next()
        .ok_or(InputError::MissingArgument { command, argument })
}

fn number<T: FromStr>(raw: &str) -> Result<T, InputError> {
    raw.parse()
        .map_err(|_| InputError::InvalidNumber(raw.to_owned()))
}

const fn items(count: u32) -> &'static str {
    if count == 1 { "item" } else { "items" }
}

/// Run the shop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run(input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    let catalog = Arc::new(Catalog::seeded());
    let mut session = ShopSession::new(catalog);
    let mut lines = input.lines();

    render(&session, out)?;
    writeln!(out, "Type 'help' for commands.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(out, "{HELP}")?,
            Ok(Some(Command::Place)) => {
                if !matches!(session.screen(), Screen::Checkout) {
                    writeln!(out, "Go to checkout from your cart first.")?;
                    continue;
                }
                let Some(form) = prompt_shipping(&mut lines, out)? else {
                    break;
                };
                step(&mut session, Action::PlaceOrder(form), out)?;
            }
            Ok(Some(Command::Act(action))) => step(&mut session, action, out)?,
            Err(err) => writeln!(out, "{err}")?,
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

fn step(session: &mut ShopSession, action: Action, out: &mut impl Write) -> io::Result<()> {
    let name = action.name();
    match session.dispatch(action) {
        Ok(outcome) => {
            tracing::debug!(action = name, screen = session.screen().name(), "Action applied");
            match outcome {
                Outcome::Navigated | Outcome::OrderPlaced => render(session, out),
                Outcome::Added { name, count } => {
                    writeln!(out, "Added {name} to cart! ({count} {} in cart)", items(count))
                }
                Outcome::LineChanged(product_id, change) => {
                    match change {
                        LineChange::Updated(quantity) => {
                            writeln!(out, "Quantity updated to {quantity}")?;
                        }
                        LineChange::Removed => writeln!(out, "Item removed from cart")?,
                        LineChange::Missing => {
                            writeln!(out, "Product {product_id} is not in your cart")?;
                        }
                    }
                    render(session, out)
                }
                Outcome::UnknownProduct(product_id) => {
                    writeln!(out, "No product with id {product_id}")
                }
                Outcome::InvalidQuantity => writeln!(out, "Please enter a valid quantity"),
            }
        }
        Err(err) => {
            tracing::debug!(action = name, error = %err, "Action refused");
            writeln!(out, "{err}")
        }
    }
}

fn prompt_shipping(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    out: &mut impl Write,
) -> io::Result<Option<ShippingForm>> {
    let mut ask = |label: &str| -> io::Result<Option<String>> {
        write!(out, "{label}: ")?;
        out.flush()?;
        lines.next().transpose()
    };

    let Some(name) = ask("Full Name *")? else {
        return Ok(None);
    };
    let Some(phone) = ask("Phone Number *")? else {
        return Ok(None);
    };
    let Some(address) = ask("Address *")? else {
        return Ok(None);
    };
    let Some(city) = ask(&format!("City ({})", CITIES.join(", ")))? else {
        return Ok(None);
    };
    let Some(email) = ask("Email (optional)")? else {
        return Ok(None);
    };

    Ok(Some(ShippingForm {
        name,
        phone,
        address,
        city: Some(city),
        email: Some(email),
    }))
}

// =============================================================================
// Screens
// =============================================================================

fn render(session: &ShopSession, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    match session.screen() {
        Screen::Home => {
            writeln!(out, "MODESTA - Where Modesty Meets Elegance")?;
            writeln!(out, "Free Shipping on orders over 500 EGP")?;
            let catalog = session.catalog();
            let counts: Vec<String> = catalog
                .categories()
                .iter()
                .map(|category| format!("{category} ({})", catalog.in_category(*category).len()))
                .collect();
            writeln!(out, "Categories: {}", counts.join(" | "))?;
            products(&session.visible_products(), out)?;
        }
        Screen::Category(category) => {
            writeln!(out, "== {category} ==")?;
            products(&session.visible_products(), out)?;
        }
        Screen::Cart => cart(session.cart(), out)?,
        Screen::Checkout => checkout(session.cart(), out)?,
        Screen::Confirmation(order) => confirmation(order, out)?,
    }
    let count = session.cart().count();
    writeln!(out, "[{}] Cart: {count} {}", session.screen().name(), items(count))
}

fn products(products: &[&Product], out: &mut impl Write) -> io::Result<()> {
    for product in products {
        writeln!(out, "{}", product_line(product))?;
    }
    Ok(())
}

fn cart(cart: &Cart, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "== Shopping Cart ==")?;
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }
    for item in cart.items() {
        writeln!(
            out,
            "{:>3}  {} x {} @ {} = {}",
            item.product.id.as_i32(),
            item.product.name,
            item.quantity,
            item.product.price,
            item.line_total()
        )?;
    }
    writeln!(out, "Total: {}", cart.total())
}

fn checkout(cart: &Cart, out: &mut impl Write) -> io::Result<()> {
    let count = cart.count();
    writeln!(out, "== Checkout ==")?;
    writeln!(out, "Order Summary ({count} {})", items(count))?;
    for item in cart.items() {
        writeln!(
            out,
            "  {} x {} = {}",
            item.product.name,
            item.quantity,
            item.line_total()
        )?;
    }
    writeln!(out, "Subtotal: {}", cart.total())?;
    writeln!(out, "Shipping: Free")?;
    writeln!(out, "Total: {}", cart.total())?;
    writeln!(out, "Payment Method: Cash on Delivery")?;
    writeln!(out, "Type 'place' to enter your shipping details.")
}

fn confirmation(order: &Order, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Order Confirmed!")?;
    writeln!(out, "Thank you for shopping with Modesta")?;
    writeln!(out, "Order Number: {}", order.number)?;
    writeln!(out, "Delivery Details:")?;
    writeln!(out, "  {}", order.shipping.name)?;
    writeln!(out, "  {}", order.shipping.phone)?;
    writeln!(out, "  {}", order.shipping.address)?;
    if let Some(city) = &order.shipping.city {
        writeln!(out, "  {city}")?;
    }
    if let Some(email) = &order.shipping.email {
        writeln!(out, "  {email}")?;
    }
    writeln!(out, "Total: {}", order.total)?;
    writeln!(out, "Type 'continue' to keep shopping.")
}
