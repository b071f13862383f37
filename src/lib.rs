#![doc = "The `todoforge` library crate."]
#![doc = ""]
#![doc = "User accounts and personal to-do items behind JWT bearer authentication."]
#![doc = "It holds the domain models, the authentication helpers, the database"]
#![doc = "queries, routing configuration and error handling used by `main.rs`."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

pub use crate::error::AppError;
