use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::models::{OrderPayload, OrderReceipt, SubmitError};
use crate::services::SimulationProfile;

/// Trait defining the interface for placing orders
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submit a normalized order payload, returning the receipt on success
    async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, SubmitError>;
}

/// Simulated order backend with configurable latency and failure injection.
pub struct SimulatedOrderService {
    profile: SimulationProfile,
}

impl SimulatedOrderService {
    pub fn new(profile: SimulationProfile) -> Self {
        Self { profile }
    }

    /// Deterministic variant used by tests and benches.
    pub fn reliable() -> Self {
        Self::new(SimulationProfile::instant())
    }

    fn generate_order_id() -> String {
        format!(
            "ORD-{}",
            Uuid::new_v4()
                .simple()
                .to_string()
                .get(0..8)
                .unwrap_or("00000000")
                .to_uppercase()
        )
    }
}

#[async_trait]
impl OrderService for SimulatedOrderService {
    #[instrument(skip(self, payload), fields(line_count = payload.lines.len(), total = %payload.total))]
    async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, SubmitError> {
        info!("Submitting order");

        self.profile.pause().await;

        if self.profile.should_fail() {
            warn!("Injected order submission failure");
            return Err(SubmitError::with_reason(
                "Server rejected the order due to invalid data.",
            ));
        }

        let receipt = OrderReceipt {
            order_id: Self::generate_order_id(),
            timestamp: Utc::now(),
        };

        info!(order_id = %receipt.order_id, "Order accepted");
        Ok(receipt)
    }
}
