// Services module - business logic layer

pub mod catalog;
pub mod checkout;
pub mod menu;
pub mod orders;
pub mod simulation;

pub use catalog::{CatalogService, SimulatedCatalogService};
pub use checkout::{CartCheckout, CheckoutSnapshot, CheckoutStatus};
pub use menu::{MenuLoader, MenuState};
pub use orders::{OrderService, SimulatedOrderService};
pub use simulation::SimulationProfile;
