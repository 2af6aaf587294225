pub mod auth;
pub mod category;
pub mod errors;
pub mod product;
pub mod purchase;
pub mod user;
