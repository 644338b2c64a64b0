use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::models::{MenuItem, MenuResponse, ServiceError, ServiceResult};
use crate::services::CatalogService;

/// Loading status of the session catalog.
///
/// Loaded and Failed are terminal; there is no automatic retry or re-fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuState {
    NotLoaded,
    Loading,
    Loaded(Vec<MenuItem>),
    Failed(String),
}

/// Owns the one catalog fetch a session performs and the resulting state.
pub struct MenuLoader {
    catalog: Arc<dyn CatalogService>,
    state: RwLock<MenuState>,
}

impl MenuLoader {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog,
            state: RwLock::new(MenuState::NotLoaded),
        }
    }

    /// Issue the session's single catalog fetch.
    ///
    /// Only the transition out of NotLoaded starts a fetch; once the loader
    /// is Loading, Loaded, or Failed, further calls return without touching
    /// the catalog service.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        {
            let mut state = self.state.write().await;
            if *state != MenuState::NotLoaded {
                return;
            }
            *state = MenuState::Loading;
        }

        info!("Loading menu");

        let result = self.catalog.fetch_menu().await;

        let mut state = self.state.write().await;
        match result {
            Ok(items) => {
                info!("Menu loaded with {} items", items.len());
                *state = MenuState::Loaded(items);
            }
            Err(err) => {
                warn!("Menu load failed: {}", err);
                *state = MenuState::Failed(err.to_string());
            }
        }
    }

    /// Snapshot of the current loading state.
    pub async fn state(&self) -> MenuState {
        self.state.read().await.clone()
    }

    /// The loaded catalog, or why it is not available.
    ///
    /// A failed fetch disables the listing entirely; there is no partial
    /// catalog.
    pub async fn menu(&self) -> ServiceResult<Vec<MenuItem>> {
        match &*self.state.read().await {
            MenuState::NotLoaded | MenuState::Loading => Err(ServiceError::MenuNotReady),
            MenuState::Failed(reason) => Err(ServiceError::MenuUnavailable {
                reason: reason.clone(),
            }),
            MenuState::Loaded(items) => Ok(items.clone()),
        }
    }

    /// Listing response for the rendering layer.
    #[instrument(skip(self))]
    pub async fn menu_response(&self) -> ServiceResult<MenuResponse> {
        let items = self.menu().await?;
        Ok(MenuResponse::from_items(items))
    }

    /// Resolve a catalog item by id for cart operations.
    pub async fn find_item(&self, item_id: &str) -> ServiceResult<MenuItem> {
        let items = self.menu().await?;
        items
            .into_iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| ServiceError::ItemNotFound {
                item_id: item_id.to_string(),
            })
    }
}
