//! Template rendering and embedded static assets

use minijinja::{Environment, ErrorKind, Value};
use rust_embed::RustEmbed;
use serde::Serialize;
use std::borrow::Cow;

use crate::config::SiteConfig;
use crate::error::Result;

use super::content::{POSTS, SERVICES};

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

#[derive(RustEmbed)]
#[folder = "static/"]
struct Assets;

/// Page renderer with the site details available to every template as `site`
pub struct Site {
    env: Environment<'static>,
}

impl Site {
    pub fn new(config: &SiteConfig) -> Self {
        let mut env = Environment::new();
        env.set_loader(load_template);
        env.add_global("site", Value::from_serialize(config));
        env.add_global("services", Value::from_serialize(SERVICES));
        env.add_global("posts", Value::from_serialize(POSTS));
        Self { env }
    }

    /// Render a template by file name, e.g. `home.html`
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}

fn load_template(name: &str) -> std::result::Result<Option<String>, minijinja::Error> {
    let Some(file) = Templates::get(name) else {
        return Ok(None);
    };
    String::from_utf8(file.data.into_owned())
        .map(Some)
        .map_err(|_| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("template {} is not valid UTF-8", name),
            )
        })
}

/// Embedded static file and its content type
pub fn asset(path: &str) -> Option<(Cow<'static, [u8]>, &'static str)> {
    let file = Assets::get(path)?;
    Some((file.data, content_type(path)))
}

fn content_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
