//! FarmAid backend server
//!
//! A small HTTP server exposing the disease detection and e-commerce API
//! groups plus a static homepage.

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;

pub use config::{AppState, Config};
pub use error::ServerError;
