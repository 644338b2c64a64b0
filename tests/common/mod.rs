use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use reqwest::Client;
use tokio::net::TcpListener;

use pizzeria_rs::{
    handlers::{
        api, health_check, metrics_handler, request_validation_middleware,
        security_headers_middleware,
    },
    observability::observability_middleware,
    services::{
        CartCheckout, CatalogService, MenuLoader, OrderService, SimulatedCatalogService,
        SimulatedOrderService,
    },
    Metrics,
};

pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
}

impl TestEnvironment {
    /// Server with deterministic backends: no latency, no failures.
    pub async fn new() -> Self {
        Self::with_services(
            Arc::new(SimulatedCatalogService::reliable()),
            Arc::new(SimulatedOrderService::reliable()),
        )
        .await
    }

    /// Server over caller-supplied backends. The menu load that normally
    /// happens at process startup is performed before the server starts, so
    /// tests see a settled menu state.
    pub async fn with_services(
        catalog: Arc<dyn CatalogService>,
        orders: Arc<dyn OrderService>,
    ) -> Self {
        let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));

        let menu_loader = Arc::new(MenuLoader::new(catalog));
        menu_loader.load().await;

        let checkout = Arc::new(CartCheckout::new(orders));

        let metrics_for_middleware = metrics.clone();
        let api_state = api::ApiState {
            menu_loader,
            checkout,
            metrics: metrics.clone(),
        };

        let app = Router::new()
            .route("/health/status", get(health_check))
            .route("/metrics", get(metrics_handler))
            .with_state(metrics)
            .route("/api/menu", get(api::get_menu))
            .route("/api/cart", get(api::get_cart))
            .route("/api/cart/items", post(api::add_cart_line))
            .route(
                "/api/cart/items/:item_id",
                put(api::update_cart_line).delete(api::remove_cart_line),
            )
            .route("/api/checkout", post(api::checkout))
            .route("/api/orders/new", post(api::new_order))
            .with_state(api_state)
            .layer(middleware::from_fn(security_headers_middleware))
            .layer(middleware::from_fn(request_validation_middleware))
            .layer(middleware::from_fn(move |req, next| {
                observability_middleware(metrics_for_middleware.clone(), req, next)
            }));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        TestEnvironment {
            client: Client::new(),
            base_url: format!("http://{}", addr),
        }
    }
}
