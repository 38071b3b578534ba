//! Gateway Admin Console - Management Backend
//!
//! This crate provides the admin console backend for the API gateway,
//! including the exception log screens, the login flow, and the
//! request guard / response compression pipeline.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod repository;
pub mod server;
pub mod state;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
