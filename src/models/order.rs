use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Cart, CheckoutDraft};

/// Normalized item reference inside an order payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: String,
    pub quantity: u32,
}

/// The payload handed to the order service at submit time.
///
/// Customer fields are trimmed and the total is the cart subtotal captured
/// at the moment the submission started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub customer_name: String,
    pub delivery_address: String,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
}

/// What the order service returns for an accepted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub timestamp: DateTime<Utc>,
}

impl OrderPayload {
    /// Build the normalized payload from the current cart and draft.
    pub fn from_cart(cart: &Cart, draft: &CheckoutDraft) -> Self {
        Self {
            customer_name: draft.customer_name.trim().to_string(),
            delivery_address: draft.delivery_address.trim().to_string(),
            lines: cart
                .lines
                .iter()
                .map(|line| OrderLine {
                    item_id: line.item_id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            total: cart.subtotal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuItem;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payload_from_cart() {
        let mut cart = Cart::new();
        cart.add_item(&MenuItem::new("P001", "Margherita", "Classic", dec!(10.00)));
        cart.add_item(&MenuItem::new("P001", "Margherita", "Classic", dec!(10.00)));
        cart.add_item(&MenuItem::new("P002", "Diavola", "Spicy", dec!(5.00)));

        let draft = CheckoutDraft::new("  Ada Lovelace ", " 12 Via Roma\n");
        let payload = OrderPayload::from_cart(&cart, &draft);

        assert_eq!(payload.customer_name, "Ada Lovelace");
        assert_eq!(payload.delivery_address, "12 Via Roma");
        assert_eq!(
            payload.lines,
            vec![
                OrderLine { item_id: "P001".to_string(), quantity: 2 },
                OrderLine { item_id: "P002".to_string(), quantity: 1 },
            ]
        );
        assert_eq!(payload.total, dec!(25.00));
    }

    #[test]
    fn test_serde_serialization() {
        let payload = OrderPayload {
            customer_name: "Ada".to_string(),
            delivery_address: "12 Via Roma".to_string(),
            lines: vec![OrderLine { item_id: "P001".to_string(), quantity: 2 }],
            total: dec!(21.00),
        };

        let json = serde_json::to_string(&payload).unwrap();
        let deserialized: OrderPayload = serde_json::from_str(&json).unwrap();

        assert_eq!(payload, deserialized);
    }
}
