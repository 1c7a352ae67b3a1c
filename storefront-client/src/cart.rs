//! Cart store
//!
//! Lines are unique by product id. Every mutation is written through to
//! client-local storage under [`CART_KEY`]; a write failure is logged and the
//! in-memory cart stays authoritative.

use shared::catalog::Product;
use shared::models::{CartItem, OrderItemInput};
use shared::money::{MAX_QUANTITY, sum_lines};

use crate::storage::{CART_KEY, LocalStorage};

#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
    storage: Option<LocalStorage>,
}

impl CartStore {
    /// Cart that is never persisted
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Restore the persisted cart; a missing or corrupt document yields an empty cart
    pub fn load(storage: LocalStorage) -> Self {
        let items = match storage.load::<Vec<CartItem>>(CART_KEY) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable persisted cart");
                Vec::new()
            }
        };
        Self {
            items,
            storage: Some(storage),
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Add `quantity` of a product, merging with an existing line
    ///
    /// Non-positive quantities are ignored; a line never exceeds the
    /// per-line maximum.
    pub fn add(&mut self, product: &Product, quantity: i32) {
        if quantity <= 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity).min(MAX_QUANTITY),
            None => self
                .items
                .push(CartItem::from_product(product, quantity.min(MAX_QUANTITY))),
        }
        self.persist();
    }

    pub fn add_one(&mut self, product: &Product) {
        self.add(product, 1);
    }

    /// Drop a line entirely
    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Replace a line's quantity; zero or less removes it
    pub fn set_quantity(&mut self, id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|i| i.id == id) {
            line.quantity = quantity.min(MAX_QUANTITY);
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Sum of quantities
    pub fn total_items(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of unit price × quantity, rounded to kobo
    pub fn total_price(&self) -> f64 {
        sum_lines(self.items.iter().map(|i| (i.price, i.quantity)))
    }

    /// Lines in the shape `POST /api/orders` expects
    pub fn order_items(&self) -> Vec<OrderItemInput> {
        self.items.iter().map(OrderItemInput::from).collect()
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.save(CART_KEY, &self.items) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }
}
