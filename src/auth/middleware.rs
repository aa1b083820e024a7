//! Client identification middleware

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Cookie carrying the opaque client id
pub const CLIENT_COOKIE: &str = "nevloh_client";

/// Client id attached to every request by [`client_session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Extract the client id from the request cookies, if it is a valid UUID
pub fn client_id_from_request(req: &Request) -> Option<String> {
    let cookie_header = req.headers().get(header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    cookie_str
        .split(';')
        .filter_map(|cookie| cookie.trim().strip_prefix(CLIENT_COOKIE)?.strip_prefix('='))
        .find_map(|value| Uuid::parse_str(value).ok())
        .map(|id| id.to_string())
}

/// Make sure every request carries a client id, issuing a cookie when needed
pub async fn client_session(mut req: Request, next: Next) -> Response {
    let (client_id, issued) = match client_id_from_request(&req) {
        Some(id) => (id, false),
        None => (Uuid::new_v4().to_string(), true),
    };

    req.extensions_mut().insert(ClientId(client_id.clone()));
    let mut response = next.run(req).await;

    if issued {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            CLIENT_COOKIE, client_id
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}
