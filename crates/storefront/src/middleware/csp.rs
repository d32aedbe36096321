//! Per-request nonce for the storefront's inline script.
//!
//! The base layout carries exactly one inline `<script>`: the one that fades
//! out the "Added to cart" toast. It is stamped with this nonce, and the
//! `script-src` directive built in [`super::security_headers`] allows only
//! that nonce, so no other inline code can run on a Modesta page.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;

/// Random bytes behind each nonce.
const NONCE_BYTES: usize = 16;

/// Nonce for the toast script on the page being rendered.
///
/// Handlers take it as an extractor and hand it to `LayoutView`, which the
/// base layout reads as `layout.nonce`.
#[derive(Clone, Debug)]
pub struct CspNonce(pub String);

impl CspNonce {
    /// Draw a fresh nonce from the thread RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(STANDARD.encode(bytes))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Stores a new [`CspNonce`] in the request extensions.
///
/// Sits outside the security headers layer, which reads the nonce back when
/// it writes the `Content-Security-Policy` header.
pub async fn csp_nonce_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(CspNonce::generate());
    next.run(request).await
}

impl<S> FromRequestParts<S> for CspNonce
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    /// An empty nonce means the toast script is blocked, not that the page
    /// fails; the header layer then omits the nonce source entirely.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(nonce) = parts.extensions.get::<Self>() {
            return Ok(nonce.clone());
        }
        tracing::warn!("No CSP nonce on request, toast script will be blocked");
        Ok(Self(String::new()))
    }
}
