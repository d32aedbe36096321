//! Domain models for storefront.
//!
//! The catalog, cart and order types live in `modesta-core`; this module only
//! holds what the web layer keeps in the session.

pub mod session;

pub use session::keys as session_keys;
