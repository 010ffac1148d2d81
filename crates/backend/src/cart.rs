//! Ephemeral cart aggregation.
//!
//! Working state for one browsing session, never a business record. The
//! total and item count are recomputed on every read; nothing is cached.

use gasdepot_core::{CartItem, Product};

/// A shopping cart.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Current lines, in the order products were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add one unit of a product: bump the quantity when the line exists,
    /// append a new line otherwise.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.items.iter_mut().find(|l| l.id == product.id) {
            line.qty += 1;
            return;
        }
        self.items.push(CartItem {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            qty: 1,
            image: Some(product.image.clone()),
        });
    }

    /// Drop the line for a product entirely, whatever its quantity.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|l| l.id != id);
    }

    /// Adjust a line's quantity by `delta`, floored at 1. Decrementing
    /// below 1 is a no-op, never a removal; [`Self::remove`] is the only
    /// way out of the cart.
    pub fn update_quantity(&mut self, id: &str, delta: i32) {
        if let Some(line) = self.items.iter_mut().find(|l| l.id == id) {
            let next = i64::from(line.qty) + i64::from(delta);
            if next >= 1 {
                line.qty = u32::try_from(next).unwrap_or(u32::MAX);
            }
        }
    }

    /// Empty the cart (after checkout, or on demand).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Money total, `Σ price × qty`.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(|l| l.price * i64::from(l.qty))
            .sum()
    }

    /// Unit count, `Σ qty`.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.qty).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_owned(),
            name: format!("product {id}"),
            price,
            description: String::new(),
            image: String::new(),
            stock: Some(10),
            is_active: Some(true),
        }
    }

    #[test]
    fn adding_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        let p = product("p1", 1_000);
        cart.add(&p);
        cart.add(&p);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), 2_000);
    }

    #[test]
    fn add_add_remove_yields_an_empty_cart() {
        let mut cart = Cart::new();
        let p = product("p1", 1_000);
        cart.add(&p);
        cart.add(&p);
        cart.remove("p1");

        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), 0);
        assert_eq!(cart.item_count(), 0);

        // same outcome re-adding after a remove
        cart.add(&p);
        cart.remove("p1");
        assert_eq!(cart.total(), 0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn decrement_floors_at_one() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 500));

        cart.update_quantity("p1", -1);
        assert_eq!(cart.item_count(), 1);

        cart.update_quantity("p1", 3);
        assert_eq!(cart.item_count(), 4);
        cart.update_quantity("p1", -2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn totals_track_mixed_lines() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1_000));
        cart.add(&product("b", 2_500));
        cart.update_quantity("b", 1);

        assert_eq!(cart.total(), 1_000 + 2_500 * 2);
        assert_eq!(cart.item_count(), 3);

        cart.clear();
        assert_eq!(cart.total(), 0);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut cart = Cart::new();
        cart.update_quantity("ghost", 5);
        cart.remove("ghost");
        assert_eq!(cart.item_count(), 0);
    }
}
