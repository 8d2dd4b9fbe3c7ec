pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod templates;
pub mod uploads;

pub use db::create_pool;
