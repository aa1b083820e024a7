//! Server-rendered website pages

mod handlers;

pub use handlers::*;
