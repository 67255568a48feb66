//! # Cart
//!
//! The operator's working cart: an ordered list of line-item snapshots plus
//! optional customer details.
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product again
//!   increases its quantity)
//! - Quantities are ≥ 1; an update to 0 or below removes the line
//! - The total is ALWAYS derived from the lines, never stored
//! - Maximum 100 distinct lines, maximum quantity 999 per line

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, MenuItem};
use crate::validation::normalize_optional_text;
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY};

/// The shopping cart. One mutable instance per operator session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Ordered line items, snapshotted from the catalog at add time.
    pub items: Vec<LineItem>,

    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub table_number: Option<String>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a catalog item, merging into an existing line when the product
    /// is already in the cart.
    pub fn add_item(&mut self, item: &MenuItem, quantity: i64) -> CoreResult<()> {
        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == item.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if self.items.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.items.push(LineItem::snapshot(item, quantity));
        Ok(())
    }

    /// Sets the quantity of a line. Zero or below removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotInCart {
                product_id: product_id.to_string(),
            }),
        }
    }

    /// Removes a line by product id.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|l| l.product_id != product_id);

        if self.items.len() == before {
            Err(CoreError::ItemNotInCart {
                product_id: product_id.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Empties the cart, including customer details.
    pub fn clear(&mut self) {
        self.items.clear();
        self.customer_name = None;
        self.customer_phone = None;
        self.table_number = None;
    }

    /// Records customer details for the next checkout. Trims each field;
    /// empty collapses to `None`.
    pub fn set_customer_info(
        &mut self,
        customer_name: Option<&str>,
        customer_phone: Option<&str>,
        table_number: Option<&str>,
    ) {
        self.customer_name = normalize_optional_text(customer_name);
        self.customer_phone = normalize_optional_text(customer_phone);
        self.table_number = normalize_optional_text(table_number);
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Derived cart total: `Σ unit_price × quantity`. Tax is applied at
    /// checkout, not here.
    pub fn total_amount(&self) -> Money {
        self.items.iter().map(|l| l.line_total()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn menu_item(id: &str, price_minor: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            restaurant_id: "r1".to_string(),
            name: format!("Item {id}"),
            description: None,
            price_minor,
            image: None,
            available: true,
            section_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item_and_derived_total() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("1", 19900), 2).unwrap();
        cart.add_item(&menu_item("2", 12900), 1).unwrap();

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total_amount().minor(), 52700);
    }

    #[test]
    fn test_add_same_product_merges_line() {
        let mut cart = Cart::new();
        let item = menu_item("1", 999);
        cart.add_item(&item, 2).unwrap();
        cart.add_item(&item, 3).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.total_amount().minor(), 4995);
    }

    /// The derived-total invariant must hold after every mutation.
    #[test]
    fn test_total_tracks_every_mutation() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("1", 1000), 2).unwrap();
        cart.add_item(&menu_item("2", 500), 4).unwrap();
        assert_eq!(cart.total_amount().minor(), 4000);

        cart.update_quantity("1", 5).unwrap();
        assert_eq!(cart.total_amount().minor(), 7000);

        cart.remove_item("2").unwrap();
        assert_eq!(cart.total_amount().minor(), 5000);

        cart.clear();
        assert_eq!(cart.total_amount(), Money::zero());
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("1", 1000), 2).unwrap();
        cart.update_quantity("1", 0).unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), Money::zero());

        // negative quantities behave the same way
        cart.add_item(&menu_item("1", 1000), 2).unwrap();
        cart.update_quantity("1", -3).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_product_is_rejected() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.update_quantity("ghost", 2),
            Err(CoreError::ItemNotInCart { .. })
        ));
        assert!(matches!(
            cart.remove_item("ghost"),
            Err(CoreError::ItemNotInCart { .. })
        ));
    }

    #[test]
    fn test_quantity_cap() {
        let mut cart = Cart::new();
        let item = menu_item("1", 1000);
        cart.add_item(&item, 900).unwrap();
        assert!(matches!(
            cart.add_item(&item, 100),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        // the failed add must not have changed the line
        assert_eq!(cart.total_quantity(), 900);
    }

    #[test]
    fn test_customer_info_normalization() {
        let mut cart = Cart::new();
        cart.set_customer_info(Some("  Priya  "), Some(""), Some("  12 "));

        assert_eq!(cart.customer_name.as_deref(), Some("Priya"));
        assert_eq!(cart.customer_phone, None);
        assert_eq!(cart.table_number.as_deref(), Some("12"));

        cart.clear();
        assert_eq!(cart.customer_name, None);
        assert_eq!(cart.table_number, None);
    }
}
