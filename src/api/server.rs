//! HTTP server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::auth::{client_session, DemoIdentities, SessionManager};
use crate::config::Config;
use crate::error::Result;
use crate::site::Site;
use crate::ui;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub site: Site,
    pub sessions: SessionManager,
    pub identities: DemoIdentities,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let identities = DemoIdentities::from_config(&config.identities)?;
        let site = Site::new(&config.site);
        let sessions = SessionManager::with_max_clients(config.session.max_clients);
        Ok(Self {
            config,
            site,
            sessions,
            identities,
        })
    }

    /// Cosmetic pause before a login result is returned
    pub async fn login_delay(&self) {
        let delay = self.config.server.login_delay_ms;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

pub type SharedState = Arc<AppState>;

/// Run the website on `host:port`
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    serve(listener, state).await
}

/// Serve the website on an already bound listener
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    let app = create_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // API routes
        .route("/api/health", get(routes::health))
        .route("/api/session", get(routes::get_session))
        .route("/api/login", post(routes::login))
        .route("/api/logout", post(routes::logout))
        .route("/api/access", get(routes::check_access))
        // Marketing pages
        .route("/", get(ui::home))
        .route("/services", get(ui::services))
        .route("/contact", get(ui::contact_page).post(ui::contact_submit))
        .route("/blog", get(ui::blog_index))
        .route("/blog/{slug}", get(ui::blog_post))
        // Session pages
        .route("/login", get(ui::login_page).post(ui::login_submit))
        .route("/signup", get(ui::signup_page).post(ui::signup_submit))
        .route("/logout", get(ui::logout).post(ui::logout))
        .route("/unauthorized", get(ui::unauthorized))
        // Guarded dashboards
        .route("/admin-dashboard", get(ui::admin_dashboard))
        .route("/customer-portal", get(ui::customer_portal))
        .route("/driver-dashboard", get(ui::driver_dashboard))
        // Assets
        .route("/static/{*path}", get(ui::static_asset))
        .fallback(ui::not_found)
        // Middleware
        .layer(middleware::from_fn(client_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
