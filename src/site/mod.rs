//! Website content, templates, and forms

pub mod content;
pub mod forms;
pub mod templates;

pub use content::{find_post, find_service, Post, Service, POSTS, SERVICES};
pub use forms::{ContactForm, SignupForm};
pub use templates::{asset, Site};
