//! Integration tests for the Modesta storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p modesta-integration-tests
//! ```
//!
//! Requests go straight through the router with `tower::ServiceExt::oneshot`,
//! so no server or port is needed. [`TestClient`] carries the session cookie
//! between requests the way a browser would.
//!
//! # Test Files
//!
//! - `storefront_pages` - Home, category, health and headers
//! - `cart_flow` - Cart mutations through form posts
//! - `checkout_flow` - HTML checkout and confirmation
//! - `api_checkout` - JSON checkout endpoint

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use tower::ServiceExt;

use modesta_core::Catalog;
use modesta_storefront::{app, config::StorefrontConfig, state::AppState};

/// Largest response body the tests will read.
const BODY_LIMIT: usize = 1024 * 1024;

/// A response with its body already collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

/// In-process browser for the storefront router.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// Build a fresh storefront with default configuration and the seeded
    /// catalog. Each client gets its own session store.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration fails to load.
    #[must_use]
    pub fn new() -> Self {
        let mut config =
            StorefrontConfig::from_lookup(|_| None).expect("default configuration loads");
        config.static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static");

        let state = AppState::new(config, Arc::new(Catalog::seeded()));
        Self {
            router: app(state),
            cookie: None,
        }
    }

    /// Forget the session cookie, as a new browser would.
    pub fn clear_cookies(&mut self) {
        self.cookie = None;
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None, Body::empty()).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        self.send(
            Method::POST,
            path,
            Some("application/x-www-form-urlencoded"),
            Body::from(form.to_owned()),
        )
        .await
    }

    /// POST a JSON value.
    pub async fn post_json(&mut self, path: &str, json: &serde_json::Value) -> TestResponse {
        self.post_raw_json(path, &json.to_string()).await
    }

    /// POST a raw string labelled as JSON.
    pub async fn post_raw_json(&mut self, path: &str, body: &str) -> TestResponse {
        self.send(
            Method::POST,
            path,
            Some("application/json"),
            Body::from(body.to_owned()),
        )
        .await
    }

    async fn send(
        &mut self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request.body(body).expect("request builds");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("body is readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
