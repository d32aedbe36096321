//! Product categories and promotional badges.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of catalog categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Abayas,
    Khimars,
    Niqabs,
    Accessories,
}

impl Category {
    /// Every category, in the order the storefront lists them.
    pub const ALL: [Self; 4] = [Self::Abayas, Self::Khimars, Self::Niqabs, Self::Accessories];

    /// Display name, also the value accepted in URLs and query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Abayas => "Abayas",
            Self::Khimars => "Khimars",
            Self::Niqabs => "Niqabs",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match against the display names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// A catalog filter: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Label used for the unfiltered view.
    pub const ALL_LABEL: &'static str = "All";

    /// Interpret an optional `category` query value.
    ///
    /// Missing values, `"All"`, and names outside the category set all mean
    /// the unfiltered view.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<Category>().ok())
            .map_or(Self::All, Self::Only)
    }

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }

    /// The label of the current selection.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Only(category) => category.as_str(),
        }
    }
}

/// Promotional label attached to a product for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    Bestseller,
    New,
    Premium,
    Popular,
}

impl Badge {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bestseller => "Bestseller",
            Self::New => "New",
            Self::Premium => "Premium",
            Self::Popular => "Popular",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_exact() {
        assert_eq!("Niqabs".parse::<Category>(), Ok(Category::Niqabs));
        assert!("niqabs".parse::<Category>().is_err());
        assert!("All".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_from_query() {
        assert_eq!(CategoryFilter::from_query(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_query(Some("All")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_query(Some("Shoes")),
            CategoryFilter::All
        );
        assert_eq!(
            CategoryFilter::from_query(Some("Khimars")),
            CategoryFilter::Only(Category::Khimars)
        );
    }

    #[test]
    fn test_filter_matches() {
        let filter = CategoryFilter::Only(Category::Abayas);
        assert!(filter.matches(Category::Abayas));
        assert!(!filter.matches(Category::Accessories));
        assert!(CategoryFilter::All.matches(Category::Accessories));
        assert_eq!(filter.label(), "Abayas");
        assert_eq!(CategoryFilter::All.label(), "All");
    }
}
