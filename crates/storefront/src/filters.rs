//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Pluralizes "item" for a count.
///
/// Templates pass fields by reference, hence `&u32`.
///
/// Usage in templates: `{{ count }} {{ count|items }}`
#[allow(clippy::unnecessary_wraps, clippy::trivially_copy_pass_by_ref)]
#[askama::filter_fn]
pub fn items(count: &u32, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(if *count == 1 { "item" } else { "items" })
}
