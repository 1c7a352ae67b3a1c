//! Cart Model

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::models::OrderItemInput;

/// One line of the shopping cart, unique by product id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    /// Unit price in naira
    pub price: f64,
    pub quantity: i32,
    /// Display glyph
    pub image: String,
}

impl CartItem {
    pub fn from_product(product: &Product, quantity: i32) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.to_string(),
            price: product.price,
            quantity,
            image: product.image.to_string(),
        }
    }

    pub fn line_total(&self) -> f64 {
        crate::money::to_f64(crate::money::line_total(self.price, self.quantity))
    }
}

impl From<&CartItem> for OrderItemInput {
    fn from(item: &CartItem) -> Self {
        Self {
            product_name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_from_product() {
        let product = catalog::find("sachet-water").unwrap();
        let item = CartItem::from_product(product, 3);
        assert_eq!(item.id, "sachet-water");
        assert_eq!(item.price, 500.0);
        assert_eq!(item.line_total(), 1500.0);

        let input = OrderItemInput::from(&item);
        assert_eq!(input.product_name, "Sachet Water");
        assert_eq!(input.quantity, 3);
        assert_eq!(input.unit_price, 500.0);
    }
}
