use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use pizzeria_rs::{
    handlers::{
        api, health_check, metrics_handler, request_validation_middleware,
        security_headers_middleware,
    },
    init_observability,
    observability::observability_middleware,
    services::{
        CartCheckout, CatalogService, MenuLoader, MenuState, OrderService,
        SimulatedCatalogService, SimulatedOrderService,
    },
    Config, Metrics,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment()?;
    println!("Configuration loaded successfully");

    init_observability(
        &config.observability.service_name,
        config.observability.enable_json_logging,
    )?;

    info!("Starting pizzeria-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!(
        "Catalog simulation: failure_rate={}, latency={}..{}ms",
        config.catalog.menu_failure_rate,
        config.catalog.menu_min_latency_ms,
        config.catalog.menu_max_latency_ms
    );
    info!(
        "Orders simulation: failure_rate={}, latency={}..{}ms",
        config.orders.order_failure_rate,
        config.orders.order_min_latency_ms,
        config.orders.order_max_latency_ms
    );

    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    let catalog: Arc<dyn CatalogService> = Arc::new(SimulatedCatalogService::new(
        config.catalog.simulation_profile(),
    ));
    let orders: Arc<dyn OrderService> = Arc::new(SimulatedOrderService::new(
        config.orders.simulation_profile(),
    ));

    let menu_loader = Arc::new(MenuLoader::new(catalog));
    let checkout = Arc::new(CartCheckout::new(orders));
    info!("Services initialized successfully");

    // The session's single catalog fetch happens at startup, not on a user
    // action. Loaded/Failed are terminal either way.
    {
        let menu_loader = menu_loader.clone();
        let metrics = metrics.clone();
        tokio::spawn(async move {
            menu_loader.load().await;
            let loaded = matches!(menu_loader.state().await, MenuState::Loaded(_));
            metrics.record_menu_fetch(loaded);
        });
    }

    let app = create_app(metrics, menu_loader, checkout);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn create_app(
    metrics: Arc<Metrics>,
    menu_loader: Arc<MenuLoader>,
    checkout: Arc<CartCheckout>,
) -> Router {
    let metrics_for_middleware = metrics.clone();

    let api_state = api::ApiState {
        menu_loader,
        checkout,
        metrics: metrics.clone(),
    };

    Router::new()
        // Health and metrics endpoints (with metrics state)
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        // Storefront endpoints (with API state)
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
        // Add middleware layers (order matters - outer to inner)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_validation_middleware))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}
