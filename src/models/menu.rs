use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single purchasable entry in the storefront catalog.
///
/// Menu items are created by the catalog service and never mutated after
/// that; the cart captures name and price at add time so a later catalog
/// change cannot desynchronize an open order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Response model for the menu listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub items: Vec<MenuItem>,
    pub total_count: usize,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

impl MenuResponse {
    pub fn from_items(items: Vec<MenuItem>) -> Self {
        let total_count = items.len();
        Self { items, total_count }
    }
}
