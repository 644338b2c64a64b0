use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::models::{
    Cart, CartLine, CheckoutDraft, MenuItem, OrderConfirmation, OrderPayload, ServiceError,
    ServiceResult, Validate,
};
use crate::services::OrderService;

/// Submission phase of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStatus {
    Idle,
    Submitting,
    Confirmed,
}

/// Read-only view of the ordering session for the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSnapshot {
    pub lines: Vec<CartLine>,
    pub total_items: u32,
    pub subtotal: Decimal,
    pub status: CheckoutStatus,
    pub submission_error: Option<String>,
    pub confirmation: Option<OrderConfirmation>,
}

/// Session state owned exclusively by the checkout component.
///
/// Invariants: while `submitting` is set there is no error and no
/// confirmation; a confirmation and a submission error never coexist.
#[derive(Debug, Default)]
struct CheckoutState {
    cart: Cart,
    submitting: bool,
    submission_error: Option<String>,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutState {
    fn status(&self) -> CheckoutStatus {
        if self.submitting {
            CheckoutStatus::Submitting
        } else if self.confirmation.is_some() {
            CheckoutStatus::Confirmed
        } else {
            CheckoutStatus::Idle
        }
    }
}

/// Owns the cart and the order submission lifecycle for one session.
///
/// Every mutation runs as one critical section under the state lock; the
/// only suspension point is the order service call, which is awaited with
/// the lock released and whose outcome is applied atomically afterwards.
pub struct CartCheckout {
    orders: Arc<dyn OrderService>,
    state: RwLock<CheckoutState>,
}

impl CartCheckout {
    pub fn new(orders: Arc<dyn OrderService>) -> Self {
        Self {
            orders,
            state: RwLock::new(CheckoutState::default()),
        }
    }

    /// Add one unit of a menu item to the cart.
    ///
    /// Always succeeds; also clears any lingering submission error, since
    /// resuming shopping acknowledges the prior failure.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add_item(&self, item: &MenuItem) {
        let mut state = self.state.write().await;
        state.cart.add_item(item);
        state.submission_error = None;
        info!("Item added, cart now holds {} lines", state.cart.lines.len());
    }

    /// Set a line's quantity; zero or less removes the line. Returns whether
    /// the cart changed.
    #[instrument(skip(self), fields(item_id = %item_id, quantity = new_quantity))]
    pub async fn set_quantity(&self, item_id: &str, new_quantity: i64) -> bool {
        let mut state = self.state.write().await;
        state.cart.set_quantity(item_id, new_quantity)
    }

    /// Remove a line from the cart. Returns whether a line was removed.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_item(&self, item_id: &str) -> bool {
        let mut state = self.state.write().await;
        state.cart.remove_item(item_id)
    }

    /// Submit the current cart with the given checkout details.
    ///
    /// Rejected without touching any state (and without calling the order
    /// service) when a submission is already in flight, the cart is empty,
    /// or the draft is incomplete. On success the cart is emptied in the
    /// same critical section that records the confirmation; on failure the
    /// cart is left untouched and the error message is kept for the form.
    #[instrument(skip(self, draft))]
    pub async fn submit(&self, draft: &CheckoutDraft) -> ServiceResult<OrderConfirmation> {
        let payload = {
            let mut state = self.state.write().await;

            if state.submitting {
                return Err(ServiceError::SubmissionInFlight);
            }
            if state.cart.is_empty() {
                return Err(ServiceError::EmptyCart);
            }
            draft.validate()?;

            state.submission_error = None;
            state.confirmation = None;
            state.submitting = true;

            OrderPayload::from_cart(&state.cart, draft)
        };

        info!(total = %payload.total, "Submitting order");
        let result = self.orders.submit_order(&payload).await;

        let mut state = self.state.write().await;
        state.submitting = false;
        match result {
            Ok(receipt) => {
                let confirmation = OrderConfirmation {
                    order_id: receipt.order_id,
                    timestamp: receipt.timestamp,
                    total_charged: payload.total,
                };
                state.cart.clear();
                state.confirmation = Some(confirmation.clone());
                info!(order_id = %confirmation.order_id, "Order confirmed");
                Ok(confirmation)
            }
            Err(err) => {
                let message = err.message();
                warn!("Order submission failed: {}", message);
                state.submission_error = Some(message);
                Err(ServiceError::Submit { source: err })
            }
        }
    }

    /// Reset the session for a fresh order, discarding the previous
    /// confirmation. The previous cart is not restored.
    #[instrument(skip(self))]
    pub async fn start_new_order(&self) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        if state.submitting {
            return Err(ServiceError::SubmissionInFlight);
        }
        state.cart.clear();
        state.submission_error = None;
        state.confirmation = None;
        info!("Session reset for a new order");
        Ok(())
    }

    /// Current session view.
    pub async fn snapshot(&self) -> CheckoutSnapshot {
        let state = self.state.read().await;
        CheckoutSnapshot {
            lines: state.cart.lines.clone(),
            total_items: state.cart.total_items(),
            subtotal: state.cart.subtotal(),
            status: state.status(),
            submission_error: state.submission_error.clone(),
            confirmation: state.confirmation.clone(),
        }
    }
}
