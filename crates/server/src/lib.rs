//! Royal Trust BD API library.
//!
//! The REST backend for the storefront and the admin panel, exposed as a
//! library so the router can be exercised in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
