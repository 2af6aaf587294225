use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::guard::guard;
use super::handlers::auth::login;
use super::handlers::categories::create_category;
use super::handlers::categories::delete_category;
use super::handlers::categories::get_category;
use super::handlers::categories::list_categories;
use super::handlers::categories::rename_category;
use super::handlers::health::health;
use super::handlers::products::create_product;
use super::handlers::products::delete_product;
use super::handlers::products::get_product;
use super::handlers::products::get_product_by_url_name;
use super::handlers::products::list_products;
use super::handlers::products::update_product;
use super::handlers::purchases::create_purchase;
use super::handlers::purchases::delete_purchase;
use super::handlers::purchases::get_purchase;
use super::handlers::purchases::list_my_purchases;
use super::handlers::purchases::list_purchases;
use super::handlers::purchases::review_purchase;
use super::handlers::users::delete_me;
use super::handlers::users::delete_user;
use super::handlers::users::get_me;
use super::handlers::users::get_user;
use super::handlers::users::list_users;
use super::handlers::users::register_user;
use super::handlers::users::update_me;
use super::routes::Endpoint;
use super::routes::RouteAccess;
use super::routes::RouteTable;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::category::ports::CategoryServicePort;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::purchase::ports::PurchaseServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub category_service: Arc<dyn CategoryServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub purchase_service: Arc<dyn PurchaseServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub routes: Arc<RouteTable>,
}

/// Every endpoint the service exposes together with its access rules.
pub fn endpoints() -> Vec<Endpoint> {
    use RouteAccess as Access;

    vec![
        Endpoint::get("/health", Access::PUBLIC, health),
        // Authentication
        Endpoint::post("/api/auth/login", Access::PUBLIC, login),
        // Users
        Endpoint::post("/api/users", Access::PUBLIC, register_user),
        Endpoint::get("/api/users", Access::ADMIN, list_users),
        Endpoint::get("/api/users/me", Access::AUTHENTICATED, get_me),
        Endpoint::patch("/api/users/me", Access::AUTHENTICATED, update_me),
        Endpoint::delete("/api/users/me", Access::AUTHENTICATED, delete_me),
        Endpoint::get("/api/users/:user_id", Access::ADMIN, get_user),
        Endpoint::delete("/api/users/:user_id", Access::ADMIN, delete_user),
        // Categories
        Endpoint::get("/api/categories", Access::PUBLIC, list_categories),
        Endpoint::post("/api/categories", Access::ADMIN, create_category),
        Endpoint::get("/api/categories/:category_id", Access::PUBLIC, get_category),
        Endpoint::patch("/api/categories/:category_id", Access::ADMIN, rename_category),
        Endpoint::delete("/api/categories/:category_id", Access::ADMIN, delete_category),
        // Products
        Endpoint::get("/api/products", Access::PUBLIC, list_products),
        Endpoint::post("/api/products", Access::ADMIN, create_product),
        Endpoint::get("/api/products/:product_id", Access::PUBLIC, get_product),
        Endpoint::patch("/api/products/:product_id", Access::ADMIN, update_product),
        Endpoint::delete("/api/products/:product_id", Access::ADMIN, delete_product),
        Endpoint::get(
            "/api/products/by-url/:url_name",
            Access::PUBLIC,
            get_product_by_url_name,
        ),
        // Purchases
        Endpoint::post("/api/purchases", Access::AUTHENTICATED, create_purchase),
        Endpoint::get("/api/purchases", Access::ADMIN, list_purchases),
        Endpoint::get("/api/purchases/mine", Access::AUTHENTICATED, list_my_purchases),
        Endpoint::get("/api/purchases/:purchase_id", Access::AUTHENTICATED, get_purchase),
        Endpoint::delete("/api/purchases/:purchase_id", Access::ADMIN, delete_purchase),
        Endpoint::patch(
            "/api/purchases/:purchase_id/review",
            Access::AUTHENTICATED,
            review_purchase,
        ),
    ]
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
    category_service: Arc<dyn CategoryServicePort>,
    product_service: Arc<dyn ProductServicePort>,
    purchase_service: Arc<dyn PurchaseServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let endpoints = endpoints();
    let routes = Arc::new(RouteTable::from_endpoints(&endpoints));
    tracing::debug!(routes = routes.len(), "Route table built");

    let state = AppState {
        user_service,
        auth_service,
        category_service,
        product_service,
        purchase_service,
        authenticator,
        routes,
    };

    let api_routes = endpoints
        .into_iter()
        .fold(Router::new(), |router, endpoint| {
            router.route(endpoint.path, endpoint.handler)
        })
        .route_layer(middleware::from_fn_with_state(state.clone(), guard));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(api_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
