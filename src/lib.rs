//! The `pricehunter` library crate.
//!
//! This crate contains the business logic, domain models, authentication
//! mechanisms, routing configuration, and error handling for the PriceHunter
//! API. It is used by the main binary (`main.rs`) to construct and run the
//! application.

pub mod api_log;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod imaging;
pub mod models;
pub mod routes;

// The app factory itself lives in main.rs; integration tests compose the
// same App inline, which keeps the HttpServiceFactory bounds out of the
// library surface.
