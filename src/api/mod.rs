//! HTTP server and JSON API

pub mod routes;
pub mod server;

pub use server::*;
