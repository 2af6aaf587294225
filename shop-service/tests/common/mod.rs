use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenService;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use shop_service::domain::auth::service::AuthService;
use shop_service::domain::category::models::Category;
use shop_service::domain::category::models::CategoryId;
use shop_service::domain::category::models::CategoryName;
use shop_service::domain::category::ports::CategoryRepository;
use shop_service::domain::category::service::CategoryService;
use shop_service::domain::errors::Entity;
use shop_service::domain::errors::RepositoryError;
use shop_service::domain::product::models::Product;
use shop_service::domain::product::models::ProductId;
use shop_service::domain::product::models::UrlName;
use shop_service::domain::product::ports::ProductRepository;
use shop_service::domain::product::service::ProductService;
use shop_service::domain::purchase::models::Purchase;
use shop_service::domain::purchase::models::PurchaseId;
use shop_service::domain::purchase::ports::PurchaseRepository;
use shop_service::domain::purchase::service::PurchaseService;
use shop_service::domain::user::models::EmailAddress;
use shop_service::domain::user::models::Password;
use shop_service::domain::user::models::User;
use shop_service::domain::user::models::UserId;
use shop_service::domain::user::ports::UserRepository;
use shop_service::domain::user::ports::UserServicePort;
use shop_service::domain::user::service::UserService;
use shop_service::inbound::http::router::create_router;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());

        let tokens = TokenService::new(JWT_SECRET, Duration::minutes(15))
            .expect("Failed to create token service");
        let authenticator = Arc::new(Authenticator::new(tokens));

        let user_service = Arc::new(UserService::new(Arc::clone(&store)));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&store),
            Arc::clone(&authenticator),
        ));
        let category_service = Arc::new(CategoryService::new(Arc::clone(&store)));
        let product_service = Arc::new(ProductService::new(
            Arc::clone(&store),
            Arc::clone(&store),
        ));
        let purchase_service = Arc::new(PurchaseService::new(
            Arc::clone(&store),
            Arc::clone(&store),
        ));

        user_service
            .ensure_admin(
                EmailAddress::new(ADMIN_EMAIL).unwrap(),
                Password::new(ADMIN_PASSWORD.to_string()).unwrap(),
            )
            .await
            .expect("Failed to seed admin account");

        let router = create_router(
            user_service,
            auth_service,
            category_service,
            product_service,
            purchase_service,
            authenticator,
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(self.url(path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Register a shopper account and return its id
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().unwrap().to_string()
    }

    /// Log in and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["accessToken"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Register and log in a shopper, returning (user id, token)
    pub async fn shopper(&self, email: &str) -> (String, String) {
        let id = self.register(email, "abc123456").await;
        let token = self.login(email, "abc123456").await;
        (id, token)
    }

    /// Create a product as admin and return its JSON representation
    pub async fn create_product(&self, admin_token: &str, body: Value) -> Value {
        let response = self
            .post("/api/products")
            .bearer_auth(admin_token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    products: Vec<Product>,
    purchases: Vec<Purchase>,
}

/// In-memory storage implementing every repository port.
///
/// Reports constraint violations the same way the PostgreSQL adapters do.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }
}

fn replace<T>(
    rows: &mut [T],
    entity: Entity,
    same: impl Fn(&T) -> bool,
    row: T,
) -> Result<(), RepositoryError> {
    let slot = rows
        .iter_mut()
        .find(|r| same(r))
        .ok_or(RepositoryError::RecordNotFound(entity))?;
    *slot = row;
    Ok(())
}

fn remove<T>(
    rows: &mut Vec<T>,
    entity: Entity,
    same: impl Fn(&T) -> bool,
) -> Result<(), RepositoryError> {
    let before = rows.len();
    rows.retain(|r| !same(r));
    if rows.len() == before {
        return Err(RepositoryError::RecordNotFound(entity));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::unique(Entity::User, "email"));
        }
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == *email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().rev().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(RepositoryError::unique(Entity::User, "email"));
        }
        let id = user.id;
        replace(&mut tables.users, Entity::User, |u| u.id == id, user.clone())?;
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        remove(&mut tables.users, Entity::User, |u| u.id == *id)?;
        tables.purchases.retain(|p| p.buyer_id != *id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn create(&self, category: Category) -> Result<Category, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.categories.iter().any(|c| c.name == category.name) {
            return Err(RepositoryError::unique(Entity::Category, "name"));
        }
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.id == *id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &CategoryName,
    ) -> Result<Option<Category>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.name == *name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(categories)
    }

    async fn update(&self, category: Category) -> Result<Category, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .categories
            .iter()
            .any(|c| c.name == category.name && c.id != category.id)
        {
            return Err(RepositoryError::unique(Entity::Category, "name"));
        }
        let id = category.id;
        replace(
            &mut tables.categories,
            Entity::Category,
            |c| c.id == id,
            category.clone(),
        )?;
        Ok(category)
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.products.iter().any(|p| p.category_id == Some(*id)) {
            return Err(RepositoryError::foreign_key(Entity::Category, "category_id"));
        }
        remove(&mut tables.categories, Entity::Category, |c| c.id == *id)
    }
}

fn check_product(tables: &Tables, product: &Product) -> Result<(), RepositoryError> {
    for other in tables.products.iter().filter(|p| p.id != product.id) {
        if other.name == product.name {
            return Err(RepositoryError::unique(Entity::Product, "name"));
        }
        if other.url_name == product.url_name {
            return Err(RepositoryError::unique(Entity::Product, "url_name"));
        }
    }
    if let Some(category_id) = product.category_id {
        if !tables.categories.iter().any(|c| c.id == category_id) {
            return Err(RepositoryError::foreign_key(Entity::Product, "category_id"));
        }
    }
    Ok(())
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn create(&self, product: Product) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        check_product(&tables, &product)?;
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_by_url_name(
        &self,
        url_name: &UrlName,
    ) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .products
            .iter()
            .find(|p| p.url_name == *url_name)
            .cloned())
    }

    async fn list(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let mut products: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| category_id.is_none() || p.category_id == category_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(products)
    }

    async fn update(&self, product: Product) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        check_product(&tables, &product)?;
        let id = product.id;
        replace(
            &mut tables.products,
            Entity::Product,
            |p| p.id == id,
            product.clone(),
        )?;
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        remove(&mut tables.products, Entity::Product, |p| p.id == *id)?;
        tables.purchases.retain(|p| p.product_id != *id);
        Ok(())
    }
}

#[async_trait]
impl PurchaseRepository for InMemoryStore {
    async fn create(&self, purchase: Purchase) -> Result<Purchase, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.products.iter().any(|p| p.id == purchase.product_id) {
            return Err(RepositoryError::foreign_key(Entity::Purchase, "product_id"));
        }
        if !tables.users.iter().any(|u| u.id == purchase.buyer_id) {
            return Err(RepositoryError::foreign_key(Entity::Purchase, "buyer_id"));
        }
        tables.purchases.push(purchase.clone());
        Ok(purchase)
    }

    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.purchases.iter().find(|p| p.id == *id).cloned())
    }

    async fn list_by_buyer(&self, buyer: &UserId) -> Result<Vec<Purchase>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .purchases
            .iter()
            .rev()
            .filter(|p| p.buyer_id == *buyer)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Purchase>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.purchases.iter().rev().cloned().collect())
    }

    async fn update(&self, purchase: Purchase) -> Result<Purchase, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let id = purchase.id;
        replace(
            &mut tables.purchases,
            Entity::Purchase,
            |p| p.id == id,
            purchase.clone(),
        )?;
        Ok(purchase)
    }

    async fn delete(&self, id: &PurchaseId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        remove(&mut tables.purchases, Entity::Purchase, |p| p.id == *id)
    }
}
