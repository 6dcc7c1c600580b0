pub mod audit;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod store;
pub mod validate;
