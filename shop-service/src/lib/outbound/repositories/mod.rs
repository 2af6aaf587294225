pub mod category;
pub mod errors;
pub mod product;
pub mod purchase;
pub mod user;

pub use category::PostgresCategoryRepository;
pub use product::PostgresProductRepository;
pub use purchase::PostgresPurchaseRepository;
pub use user::PostgresUserRepository;
