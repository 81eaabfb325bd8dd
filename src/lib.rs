//! Circulation Admin
//!
//! Editing state behind the library catalog's administrative interface:
//! lanes and their custom lists, the custom list sidebar and book
//! complaints, plus an HTTP client for the circulation server's admin API.

pub mod config;
pub mod editor;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use config::AppConfig;
pub use error::{AdminError, AdminResult, Confirmation};
