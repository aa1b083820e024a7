//! Nevloh - fuel delivery website with a role-based session gate
//!
//! This is the library interface for Nevloh. The session gate lives in
//! [`auth`]; the website and JSON API built on top of it live in [`api`],
//! [`ui`] and [`site`].

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod site;
pub mod ui;

pub use auth::{check_access, Decision, Role, Route, Session};
pub use config::Config;
pub use error::Error;
