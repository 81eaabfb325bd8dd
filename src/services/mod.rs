//! Clients for the circulation server

pub mod admin_client;

pub use admin_client::AdminClient;
