use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MenuItem;

/// The shopping cart for the current ordering session.
///
/// Lines keep their insertion order: the first time an item is added decides
/// where its line lives for the rest of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One distinct menu item and its quantity in the current order.
///
/// Name and price are captured at add time. Invariant: at most one line per
/// item id, and quantity is always >= 1 (a drop to zero removes the line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

/// Checkout form data collected from the customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutDraft {
    pub customer_name: String,
    pub delivery_address: String,
}

/// Receipt-like result of a successful order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub timestamp: DateTime<Utc>,
    pub total_charged: Decimal,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add one unit of a menu item, merging into an existing line if present.
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                quantity: 1,
                added_at: Utc::now(),
            });
        }
        self.updated_at = Utc::now();
    }

    /// Set the quantity of a line. Zero or negative quantities remove the
    /// line; unknown item ids are a no-op. Returns whether anything changed.
    pub fn set_quantity(&mut self, item_id: &str, new_quantity: i64) -> bool {
        if new_quantity <= 0 {
            return self.remove_item(item_id);
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    /// Remove a line from the cart. Returns whether a line was removed.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let original_len = self.lines.len();
        self.lines.retain(|line| line.item_id != item_id);
        let removed = self.lines.len() != original_len;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.updated_at = Utc::now();
    }

    /// Sum of price x quantity across all lines, recomputed on every call.
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum()
    }

    /// Total unit count across all lines.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get_line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        self.lines.iter().any(|line| line.item_id == item_id)
    }

    pub fn line_quantity(&self, item_id: &str) -> u32 {
        self.get_line(item_id).map(|line| line.quantity).unwrap_or(0)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl CartLine {
    /// Price x quantity for this line.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl CheckoutDraft {
    pub fn new(customer_name: impl Into<String>, delivery_address: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            delivery_address: delivery_address.into(),
        }
    }

    /// Both fields are required non-blank (after trimming) before a
    /// submission is allowed.
    pub fn is_complete(&self) -> bool {
        !self.customer_name.trim().is_empty() && !self.delivery_address.trim().is_empty()
    }
}
