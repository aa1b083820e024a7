//! Web UI handlers

use axum::{
    extract::{Form, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use chrono::Utc;
use minijinja::context;
use serde::{Deserialize, Serialize};

use crate::api::server::{AppState, SharedState};
use crate::auth::{
    check_access_with, dashboard_route_for, ClientId, Decision, LoginRequest, Role, Route,
    Session,
};
use crate::error::Result;
use crate::site::{self, ContactForm, SignupForm};

/// Session details the page header needs
#[derive(Debug, Serialize)]
pub struct Nav {
    pub authenticated: bool,
    pub email: Option<String>,
    pub role_title: &'static str,
    pub dashboard: &'static str,
}

impl From<&Session> for Nav {
    fn from(session: &Session) -> Self {
        let role = session.role.unwrap_or(Role::Unknown);
        Self {
            authenticated: session.authenticated,
            email: session.email.clone(),
            role_title: role.title(),
            dashboard: dashboard_route_for(role).path(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RoleOption {
    value: &'static str,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct Panel {
    title: &'static str,
    value: &'static str,
    note: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    pub service: Option<String>,
}

async fn nav(state: &AppState, client: &ClientId) -> Nav {
    Nav::from(&state.sessions.session(client.as_str()).await)
}

fn login_roles() -> Vec<RoleOption> {
    Role::KNOWN
        .iter()
        .map(|role| RoleOption {
            value: role.as_str(),
            label: role.title(),
        })
        .collect()
}

// Marketing pages

/// Home page
pub async fn home(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Html<String>> {
    let nav = nav(&state, &client).await;
    Ok(Html(state.site.render("home.html", context! { nav })?))
}

/// Services page
pub async fn services(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Html<String>> {
    let nav = nav(&state, &client).await;
    Ok(Html(state.site.render("services.html", context! { nav })?))
}

/// Blog index
pub async fn blog_index(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Html<String>> {
    let nav = nav(&state, &client).await;
    Ok(Html(state.site.render("blog.html", context! { nav })?))
}

/// Single blog post, 404 page for unknown slugs
pub async fn blog_post(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let nav = nav(&state, &client).await;
    match site::find_post(&slug) {
        Some(post) => {
            let html = state.site.render("post.html", context! { nav, post })?;
            Ok(Html(html).into_response())
        }
        None => {
            let html = state.site.render("not_found.html", context! { nav })?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
    }
}

/// Contact form, optionally preselecting a service
pub async fn contact_page(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
    Query(query): Query<ContactQuery>,
) -> Result<Html<String>> {
    let nav = nav(&state, &client).await;
    let form = ContactForm {
        service: query.service.unwrap_or_default(),
        ..Default::default()
    };
    Ok(Html(state.site.render(
        "contact.html",
        context! { nav, form, sent => false },
    )?))
}

/// Contact form submission; acknowledged and logged, nothing is stored
pub async fn contact_submit(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let nav = nav(&state, &client).await;
    match form.validate() {
        Ok(()) => {
            tracing::info!(
                name = %form.name,
                email = %form.email,
                service = %form.service,
                "Contact request received"
            );
            let html = state
                .site
                .render("contact.html", context! { nav, form, sent => true })?;
            Ok(Html(html).into_response())
        }
        Err(e) => {
            let html = state.site.render(
                "contact.html",
                context! { nav, form, sent => false, error => e.to_string() },
            )?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
    }
}

// Session pages

/// Login form; signed-in users go straight to their dashboard
pub async fn login_page(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Response> {
    let session = state.sessions.session(client.as_str()).await;
    if let Some(role) = session.role.filter(|r| session.authenticated && r.is_known()) {
        return Ok(Redirect::to(dashboard_route_for(role).path()).into_response());
    }

    let html = state.site.render(
        "login.html",
        context! {
            nav => Nav::from(&session),
            roles => login_roles(),
            selected_role => Role::Customer.as_str(),
            email => "",
        },
    )?;
    Ok(Html(html).into_response())
}

/// Login submission: redirect to the role's dashboard or show the error inline
pub async fn login_submit(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
    Form(req): Form<LoginRequest>,
) -> Result<Response> {
    state.login_delay().await;

    let role = Role::from_label(&req.role);
    let result = state
        .sessions
        .authenticate(client.as_str(), &state.identities, &req.email, &req.password, role)
        .await;

    match result {
        Ok(_) => Ok(Redirect::to(dashboard_route_for(role).path()).into_response()),
        Err(e) => {
            let session = state.sessions.session(client.as_str()).await;
            let html = state.site.render(
                "login.html",
                context! {
                    nav => Nav::from(&session),
                    roles => login_roles(),
                    selected_role => req.role,
                    email => req.email,
                    error => e.to_string(),
                },
            )?;
            Ok((e.status_code(), Html(html)).into_response())
        }
    }
}

/// Signup form
pub async fn signup_page(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Html<String>> {
    let nav = nav(&state, &client).await;
    let form = SignupForm {
        role: Role::Customer.as_str().to_string(),
        ..Default::default()
    };
    Ok(Html(state.site.render("signup.html", context! { nav, form })?))
}

/// Signup submission; accepted requests are logged, no account is created
pub async fn signup_submit(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
    Form(mut form): Form<SignupForm>,
) -> Result<Response> {
    let nav = nav(&state, &client).await;
    let result = form.validate();

    // Never echo passwords back into the page
    form.password.clear();
    form.confirm_password.clear();

    match result {
        Ok(role) => {
            tracing::info!(email = %form.email, role = %role, "Signup request received");
            let html = state.site.render(
                "signup.html",
                context! { nav, form, requested => role.title().to_lowercase() },
            )?;
            Ok(Html(html).into_response())
        }
        Err(e) => {
            let html = state
                .site
                .render("signup.html", context! { nav, form, error => e.to_string() })?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
    }
}

/// Clear the session and return to the login page
pub async fn logout(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Redirect {
    state.sessions.logout(client.as_str()).await;
    tracing::info!("Client {} logged out", client.as_str());
    Redirect::to(Route::Login.path())
}

/// Shown when a signed-in user opens another role's dashboard
pub async fn unauthorized(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Response> {
    let nav = nav(&state, &client).await;
    let html = state.site.render("unauthorized.html", context! { nav })?;
    Ok((StatusCode::FORBIDDEN, Html(html)).into_response())
}

// Guarded dashboards

async fn dashboard(
    state: &AppState,
    client: &ClientId,
    role: Role,
    heading: &str,
    panels: &[Panel],
) -> Result<Response> {
    let session = state.sessions.session(client.as_str()).await;
    match check_access_with(state.config.gate.policy, &session, Some(role)) {
        Decision::Allow => {
            let html = state.site.render(
                "dashboard.html",
                context! {
                    nav => Nav::from(&session),
                    heading,
                    panels,
                    signed_in_for => session.age_label(Utc::now()),
                },
            )?;
            Ok(Html(html).into_response())
        }
        Decision::Redirect(route) => {
            tracing::debug!("Gate sent client {} to {}", client.as_str(), route);
            Ok(Redirect::to(route.path()).into_response())
        }
    }
}

/// Operations overview for admins
pub async fn admin_dashboard(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Response> {
    const PANELS: &[Panel] = &[
        Panel { title: "Deliveries today", value: "42", note: "8 still on route" },
        Panel { title: "Active drivers", value: "12", note: "2 on standby" },
        Panel { title: "Gallons this week", value: "18,450", note: "Diesel and gasoline" },
        Panel { title: "Open requests", value: "5", note: "From the contact form" },
    ];
    dashboard(&state, &client, Role::Admin, "Admin dashboard", PANELS).await
}

/// Orders and invoices for customers
pub async fn customer_portal(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Response> {
    const PANELS: &[Panel] = &[
        Panel { title: "Next delivery", value: "Tomorrow", note: "Overnight window" },
        Panel { title: "Tank level", value: "64%", note: "Auto-refill below 25%" },
        Panel { title: "Open invoices", value: "1", note: "Due in 14 days" },
    ];
    dashboard(&state, &client, Role::Customer, "Customer portal", PANELS).await
}

/// Route and stops for drivers
pub async fn driver_dashboard(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Response> {
    const PANELS: &[Panel] = &[
        Panel { title: "Stops today", value: "9", note: "First stop 04:30" },
        Panel { title: "Truck load", value: "3,200 gal", note: "Clear diesel" },
        Panel { title: "Completed", value: "0", note: "Route not started" },
    ];
    dashboard(&state, &client, Role::Driver, "Driver dashboard", PANELS).await
}

// Assets and fallback

/// Embedded static files
pub async fn static_asset(Path(path): Path<String>) -> Response {
    match site::asset(&path) {
        Some((body, mime)) => ([(header::CONTENT_TYPE, mime)], body.into_owned()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// 404 page for everything else
pub async fn not_found(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> Result<Response> {
    let nav = nav(&state, &client).await;
    let html = state.site.render("not_found.html", context! { nav })?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
