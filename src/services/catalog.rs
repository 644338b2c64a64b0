use async_trait::async_trait;
use rust_decimal_macros::dec;
use tracing::{info, instrument, warn};

use crate::models::{FetchError, MenuItem};
use crate::services::SimulationProfile;

/// Trait defining the interface for fetching the storefront catalog
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch the full menu for this session
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, FetchError>;
}

/// Simulated catalog backend with configurable latency and failure injection.
///
/// Stands in for the real remote catalog; the storefront core only needs a
/// call that either yields the full item list or fails.
pub struct SimulatedCatalogService {
    items: Vec<MenuItem>,
    profile: SimulationProfile,
}

impl SimulatedCatalogService {
    pub fn new(profile: SimulationProfile) -> Self {
        Self {
            items: default_menu(),
            profile,
        }
    }

    pub fn with_items(items: Vec<MenuItem>, profile: SimulationProfile) -> Self {
        Self { items, profile }
    }

    /// Deterministic variant used by tests and benches.
    pub fn reliable() -> Self {
        Self::new(SimulationProfile::instant())
    }
}

#[async_trait]
impl CatalogService for SimulatedCatalogService {
    #[instrument(skip(self))]
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, FetchError> {
        info!("Fetching menu");

        self.profile.pause().await;

        if self.profile.should_fail() {
            warn!("Injected menu fetch failure");
            return Err(FetchError::Unavailable {
                message: "The menu could not be loaded.".to_string(),
            });
        }

        info!("Menu fetched with {} items", self.items.len());
        Ok(self.items.clone())
    }
}

/// The built-in pizza catalog served by the simulated backend.
fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(
            "P001",
            "Margherita",
            "Tomato, mozzarella, fresh basil",
            dec!(9.50),
        ),
        MenuItem::new(
            "P002",
            "Diavola",
            "Tomato, mozzarella, spicy salami",
            dec!(11.00),
        ),
        MenuItem::new(
            "P003",
            "Quattro Formaggi",
            "Mozzarella, gorgonzola, parmesan, fontina",
            dec!(12.50),
        ),
        MenuItem::new(
            "P004",
            "Capricciosa",
            "Tomato, mozzarella, ham, mushrooms, artichokes",
            dec!(12.00),
        ),
        MenuItem::new(
            "P005",
            "Ortolana",
            "Tomato, mozzarella, grilled vegetables",
            dec!(10.50),
        ),
        MenuItem::new(
            "P006",
            "Prosciutto e Funghi",
            "Tomato, mozzarella, ham, mushrooms",
            dec!(11.50),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reliable_catalog_returns_menu() {
        let service = SimulatedCatalogService::reliable();

        let menu = service.fetch_menu().await.unwrap();

        assert!(!menu.is_empty());
        assert!(menu.iter().all(|item| !item.id.is_empty()));
        assert!(menu.iter().all(|item| item.price > rust_decimal::Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_item_ids_are_distinct() {
        let service = SimulatedCatalogService::reliable();

        let menu = service.fetch_menu().await.unwrap();
        let mut ids: Vec<_> = menu.iter().map(|item| item.id.clone()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), menu.len());
    }

    #[tokio::test]
    async fn test_certain_failure_is_surfaced() {
        let service = SimulatedCatalogService::new(SimulationProfile::new(1.0, 0, 0));

        let result = service.fetch_menu().await;

        match result {
            Err(FetchError::Unavailable { message }) => {
                assert!(!message.is_empty());
            }
            other => panic!("Expected Unavailable error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_custom_items() {
        let items = vec![MenuItem::new("X1", "Test Pie", "Test", dec!(1.00))];
        let service =
            SimulatedCatalogService::with_items(items.clone(), SimulationProfile::instant());

        let menu = service.fetch_menu().await.unwrap();
        assert_eq!(menu, items);
    }
}
