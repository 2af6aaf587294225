use std::sync::Arc;

use auth::Authenticator;
use auth::TokenService;
use shop_service::config::Config;
use shop_service::domain::auth::service::AuthService;
use shop_service::domain::category::service::CategoryService;
use shop_service::domain::product::service::ProductService;
use shop_service::domain::purchase::service::PurchaseService;
use shop_service::domain::user::models::EmailAddress;
use shop_service::domain::user::models::Password;
use shop_service::domain::user::ports::UserServicePort;
use shop_service::domain::user::service::UserService;
use shop_service::inbound::http::router::create_router;
use shop_service::outbound::repositories::PostgresCategoryRepository;
use shop_service::outbound::repositories::PostgresProductRepository;
use shop_service::outbound::repositories::PostgresPurchaseRepository;
use shop_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "shop-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        admin_bootstrap = config.admin.is_some(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let tokens = TokenService::new(config.jwt.secret.as_bytes(), config.jwt.ttl())?;
    let authenticator = Arc::new(Authenticator::new(tokens));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let category_repository = Arc::new(PostgresCategoryRepository::new(pg_pool.clone()));
    let product_repository = Arc::new(PostgresProductRepository::new(pg_pool.clone()));
    let purchase_repository = Arc::new(PostgresPurchaseRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let category_service = Arc::new(CategoryService::new(Arc::clone(&category_repository)));
    let product_service = Arc::new(ProductService::new(
        Arc::clone(&product_repository),
        category_repository,
    ));
    let purchase_service = Arc::new(PurchaseService::new(
        purchase_repository,
        product_repository,
    ));

    if let Some(admin) = &config.admin {
        let email = EmailAddress::new(&admin.email)?;
        let password = Password::new(admin.password.clone())?;
        let account = user_service.ensure_admin(email, password).await?;
        tracing::info!(user_id = %account.id, "Admin account ready");
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        auth_service,
        category_service,
        product_service,
        purchase_service,
        authenticator,
    );

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited");

    Ok(())
}
