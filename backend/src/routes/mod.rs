//! Route definitions for the Cooperative Commodity Management Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Farmer registry
        .nest("/farmers", farmer_routes())
        // Shelter (collection point) management
        .nest("/shelters", shelter_routes())
        // Product catalog
        .nest("/products", product_routes())
        // Purchase intake
        .nest("/purchases", purchase_routes())
        // Inventory
        .nest("/inventory", inventory_routes())
        // Batch processing
        .nest("/batches", batch_routes())
        // Point of sale
        .nest("/sales", sale_routes())
        // User administration
        .nest("/users", user_routes())
}

/// Farmer registry routes
fn farmer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farmers).post(handlers::create_farmer))
        .route(
            "/:farmer_id",
            get(handlers::get_farmer).put(handlers::update_farmer),
        )
}

/// Shelter management routes
fn shelter_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_shelters).post(handlers::create_shelter))
        .route("/:shelter_id", get(handlers::get_shelter))
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:product_id",
            get(handlers::get_product).put(handlers::update_product),
        )
}

/// Purchase intake routes
fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_purchases).post(handlers::create_purchase))
        .route("/preview", post(handlers::preview_purchase))
        .route("/:purchase_id", get(handlers::get_purchase))
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/movements", get(handlers::list_movements))
        .route("/adjustments", post(handlers::record_adjustment))
        .route("/balances", get(handlers::get_balances))
        .route("/summary", get(handlers::get_inventory_summary))
}

/// Batch processing routes
fn batch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_batches).post(handlers::create_batch))
        .route("/:batch_id", get(handlers::get_batch))
        .route("/:batch_id/complete", post(handlers::complete_batch))
}

/// Point-of-sale routes
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::create_sale))
        .route("/:sale_id", get(handlers::get_sale))
}

/// User administration routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:user_id",
            get(handlers::get_user).put(handlers::update_user),
        )
}
