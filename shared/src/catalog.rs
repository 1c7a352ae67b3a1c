//! Static product catalog
//!
//! The storefront sells a fixed handful of items; the list lives in code and
//! is served read-only by `GET /api/products`.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Purchasable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub description: Cow<'static, str>,
    /// Unit price in naira
    pub price: f64,
    /// Display glyph
    pub image: Cow<'static, str>,
    pub badge: Cow<'static, str>,
}

pub static PRODUCTS: [Product; 3] = [
    Product {
        id: Cow::Borrowed("visionary-popcorn"),
        name: Cow::Borrowed("Visionary Popcorn"),
        description: Cow::Borrowed("Classic rich flavor with a perfect golden coating. \
                      Made with real premium ingredients for that authentic taste."),
        price: 600.0,
        image: Cow::Borrowed("🍿"),
        badge: Cow::Borrowed("Fresh"),
    },
    Product {
        id: Cow::Borrowed("small-popcorn"),
        name: Cow::Borrowed("Small Popcorn"),
        description: Cow::Borrowed("Perfect individual size! Classic buttery goodness in a convenient portion."),
        price: 300.0,
        image: Cow::Borrowed("🍿"),
        badge: Cow::Borrowed("Snack"),
    },
    Product {
        id: Cow::Borrowed("sachet-water"),
        name: Cow::Borrowed("Sachet Water"),
        description: Cow::Borrowed("Pure, clean drinking water. Stay hydrated while enjoying your popcorn!"),
        price: 500.0,
        image: Cow::Borrowed("💧"),
        badge: Cow::Borrowed("Essential"),
    },
];

pub fn all() -> &'static [Product] {
    &PRODUCTS
}

pub fn find(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        assert_eq!(all().len(), 3);
        assert_eq!(find("visionary-popcorn").unwrap().price, 600.0);
        assert_eq!(find("small-popcorn").unwrap().price, 300.0);
        assert_eq!(find("sachet-water").unwrap().image, "💧");
        assert!(find("caramel-popcorn").is_none());
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<_> = all().iter().map(|p| p.id.as_ref()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }
}
