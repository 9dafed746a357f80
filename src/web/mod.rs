//! Web server: pages, the visualizer API and lead-form endpoints.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /` - Landing page (`?testimonial=N` picks the carousel slide)
//! - `POST /quote` - Free quote form (HTML)
//! - `GET /gallery` - Color visualizer and project tiles (state in the query)
//! - `GET /contact`, `POST /contact` - Contact page and form (HTML)
//! - `GET /assets/{*path}` - Embedded static assets
//! - `GET /api/content` - Site content and business details
//! - `GET /api/visualizer` - Illustration variants
//! - `GET /api/visualizer/{variant}` - Swatch catalog of a variant
//! - `GET /api/visualizer/{variant}/house.svg` - Rendered illustration
//! - `POST /api/visualizer/{variant}/actions` - Apply a control action
//! - `POST /api/contact` - Contact form (JSON)
//! - `POST /api/quote` - Free quote request (JSON)

pub mod pages;
pub mod query;
pub mod static_files;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{Config, SiteConfig};
use crate::contact::{ContactForm, FieldErrors, LeadKind, OutboundMessage, QuoteRequest};
use crate::content::{Card, GalleryItem, NavLink, SiteContent, Testimonial, TestimonialCarousel, NAV_LINKS};
use crate::models::{HouseVariant, Section, VariantCatalog};
use crate::relay::{EmailJsRelay, EmailRelay, RelayError};
use crate::render;
use crate::visualizer::{ColorVisualizer, OsRandom, VisualizerAction, VisualizerError, VisualizerSnapshot};

use pages::{FormView, Notice, PageContext};
use query::QueryError;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web server.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Swatch catalogs of every variant (immutable after load)
    catalogs: Arc<Vec<VariantCatalog>>,
    /// Static site content
    content: Arc<SiteContent>,
    /// Outbound email relay
    relay: Arc<dyn EmailRelay>,
}

impl AppState {
    /// Creates a new application state with the configured email relay.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let relay = EmailJsRelay::from_config(&config.relay);
        if !relay.is_configured() {
            warn!("Email relay credentials are not configured; form submissions will fail");
        }
        Self::with_relay(config, Arc::new(relay))
    }

    /// Creates a new application state with a specific relay.
    pub fn with_relay(config: Config, relay: Arc<dyn EmailRelay>) -> anyhow::Result<Self> {
        let catalogs = VariantCatalog::load_all()?;
        let content = SiteContent::load(&catalogs)?;
        Ok(Self {
            config: Arc::new(config),
            catalogs: Arc::new(catalogs),
            content: Arc::new(content),
            relay,
        })
    }

    /// Returns the catalog of a variant.
    #[must_use]
    pub fn catalog(&self, variant: HouseVariant) -> Option<&VariantCatalog> {
        self.catalogs.iter().find(|c| c.variant == variant)
    }

    fn page<'a>(&'a self, path: &'a str) -> PageContext<'a> {
        PageContext {
            site: &self.config.site,
            content: &self.content,
            path,
            year: chrono::Local::now().year(),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Site content response.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    /// Business details.
    pub business: SiteConfig,
    /// Header navigation.
    pub nav: Vec<NavLink>,
    /// Service cards.
    pub services: Vec<Card>,
    /// Feature boxes.
    pub features: Vec<Card>,
    /// Testimonials.
    pub testimonials: Vec<Testimonial>,
    /// Recent-project tiles.
    pub gallery: Vec<GalleryItem>,
}

/// Summary of an illustration variant.
#[derive(Debug, Serialize)]
pub struct VariantSummary {
    /// Variant identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Paintable sections, in button order.
    pub sections: Vec<Section>,
    /// Preset names.
    pub presets: Vec<String>,
}

/// Variant list response.
#[derive(Debug, Serialize)]
pub struct VariantListResponse {
    /// Available variants.
    pub variants: Vec<VariantSummary>,
}

/// Body of `POST /api/visualizer/{variant}/actions`.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    /// Current state; the default state when omitted.
    #[serde(default)]
    pub state: Option<VisualizerSnapshot>,
    /// Action to apply.
    pub action: VisualizerAction,
}

/// Result of a visualizer action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// New state.
    pub state: VisualizerSnapshot,
    /// Name of the swatch matching the active section, if any.
    pub selected_swatch: Option<String>,
    /// Name of the preset matching all colors, if any.
    pub matching_preset: Option<String>,
    /// Rendered illustration.
    pub svg: String,
}

/// Successful lead submission.
#[derive(Debug, Serialize)]
pub struct SentResponse {
    /// Always "sent".
    pub status: &'static str,
    /// Text to show the submitter.
    pub message: &'static str,
    /// Submission identifier, also logged.
    pub id: Uuid,
}

/// Rejected lead submission.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    /// Summary message.
    pub error: &'static str,
    /// Message per failing field.
    pub fields: FieldErrors,
}

/// Landing page query.
#[derive(Debug, Deserialize)]
pub struct LandingQuery {
    /// Carousel slide index
    pub testimonial: Option<usize>,
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_variant(raw: &str) -> Result<HouseVariant, (StatusCode, Json<ApiError>)> {
    raw.parse().map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("Unknown illustration variant: {raw}"))),
        )
    })
}

fn catalog_for<'a>(
    state: &'a AppState,
    raw: &str,
) -> Result<&'a VariantCatalog, (StatusCode, Json<ApiError>)> {
    let variant = parse_variant(raw)?;
    state.catalog(variant).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("No catalog for variant: {variant}"))),
        )
    })
}

fn visualizer_error(err: &VisualizerError) -> (StatusCode, Json<ApiError>) {
    let status = match err {
        VisualizerError::UnknownPreset(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ApiError::with_details("Invalid visualizer state", err.to_string())))
}

fn query_error(err: &QueryError) -> (StatusCode, Json<ApiError>) {
    match err {
        QueryError::Visualizer(inner) => visualizer_error(inner),
        other => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid visualizer query", other.to_string())),
        ),
    }
}

/// Quoted strong ETag of a response body.
fn etag_for(body: &str) -> String {
    let digest = Sha256::digest(body.as_bytes());
    format!("\"{:x}\"", digest)
}

/// Relays a validated lead on the blocking pool.
async fn relay_lead(state: &AppState, message: OutboundMessage) -> Result<Uuid, RelayError> {
    let id = Uuid::new_v4();
    let kind = message.kind;
    info!(%id, ?kind, "Relaying lead");

    let relay = Arc::clone(&state.relay);
    let result = tokio::task::spawn_blocking(move || relay.send(&message))
        .await
        .unwrap_or_else(|e| Err(RelayError::Transport(format!("relay task failed: {e}"))));

    match result {
        Ok(()) => Ok(id),
        Err(e) => {
            warn!(%id, ?kind, error = %e, "Lead relay failed");
            Err(e)
        }
    }
}

/// Outcome of an API lead submission.
enum LeadOutcome {
    Sent(LeadKind, Uuid),
    Invalid(FieldErrors),
    Failed(LeadKind),
}

impl IntoResponse for LeadOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Sent(kind, id) => Json(SentResponse {
                status: "sent",
                message: kind.success_message(),
                id,
            })
            .into_response(),
            Self::Invalid(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse {
                    error: "Please correct the highlighted fields",
                    fields,
                }),
            )
                .into_response(),
            Self::Failed(kind) => (
                StatusCode::BAD_GATEWAY,
                Json(ApiError::new(kind.failure_message())),
            )
                .into_response(),
        }
    }
}

async fn submit_lead(
    state: &AppState,
    kind: LeadKind,
    validated: Result<OutboundMessage, FieldErrors>,
) -> LeadOutcome {
    let message = match validated {
        Ok(message) => message,
        Err(fields) => {
            debug!(?kind, failed = fields.len(), "Lead failed validation");
            return LeadOutcome::Invalid(fields);
        }
    };
    match relay_lead(state, message).await {
        Ok(id) => LeadOutcome::Sent(kind, id),
        Err(_) => LeadOutcome::Failed(kind),
    }
}

/// Page form view after a submission; values are kept unless it was sent.
fn form_view(outcome: &LeadOutcome, name: &str, email: &str, subject: &str, message: &str) -> (StatusCode, FormView) {
    let filled = FormView {
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        message: message.to_string(),
        ..FormView::default()
    };
    match outcome {
        LeadOutcome::Sent(kind, _) => (
            StatusCode::OK,
            FormView {
                notice: Some(Notice::Success(kind.success_message().to_string())),
                ..FormView::default()
            },
        ),
        LeadOutcome::Invalid(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            FormView {
                errors: errors.clone(),
                ..filled
            },
        ),
        LeadOutcome::Failed(kind) => (
            StatusCode::BAD_GATEWAY,
            FormView {
                notice: Some(Notice::Error(kind.failure_message().to_string())),
                ..filled
            },
        ),
    }
}

// ============================================================================
// Page Handlers
// ============================================================================

async fn landing_page(
    State(state): State<AppState>,
    Query(query): Query<LandingQuery>,
) -> Html<String> {
    let carousel = TestimonialCarousel::at(
        state.content.testimonials.len(),
        query.testimonial.unwrap_or(0),
    );
    Html(pages::landing(&state.page("/"), carousel, &FormView::default()))
}

async fn submit_quote_page(
    State(state): State<AppState>,
    Form(request): Form<QuoteRequest>,
) -> (StatusCode, Html<String>) {
    let outcome = submit_lead(&state, LeadKind::Quote, request.validate()).await;
    let (status, view) = form_view(&outcome, &request.name, &request.email, "", &request.message);
    let carousel = state.content.carousel();
    (status, Html(pages::landing(&state.page("/"), carousel, &view)))
}

async fn gallery_page(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let ctx = state.page("/gallery");
    let variant = match params.get("variant").map(|raw| raw.parse::<HouseVariant>()) {
        None => HouseVariant::default(),
        Some(Ok(variant)) => variant,
        Some(Err(e)) => {
            return (
                StatusCode::NOT_FOUND,
                Html(pages::error_page(&ctx, "Not Found", &e.to_string())),
            );
        }
    };
    let Some(catalog) = state.catalog(variant) else {
        return (
            StatusCode::NOT_FOUND,
            Html(pages::error_page(&ctx, "Not Found", "Unknown illustration")),
        );
    };

    let visualizer = query::restore(catalog, &params).and_then(|mut visualizer| {
        query::apply_page_actions(&mut visualizer, &params, &mut OsRandom)?;
        Ok(visualizer)
    });
    match visualizer {
        Ok(visualizer) => (
            StatusCode::OK,
            Html(pages::gallery(&ctx, &visualizer, &state.catalogs)),
        ),
        Err(e) => {
            debug!(error = %e, "Rejected visualizer link");
            (
                StatusCode::BAD_REQUEST,
                Html(pages::error_page(&ctx, "Invalid Link", &e.to_string())),
            )
        }
    }
}

async fn contact_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::contact(&state.page("/contact"), &FormView::default()))
}

async fn submit_contact_page(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> (StatusCode, Html<String>) {
    let outcome = submit_lead(&state, LeadKind::Contact, form.validate()).await;
    let subject = form.subject.as_deref().unwrap_or_default();
    let (status, view) = form_view(&outcome, &form.name, &form.email, subject, &form.message);
    (status, Html(pages::contact(&state.page("/contact"), &view)))
}

async fn not_found_page(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(pages::error_page(
            &state.page(""),
            "Not Found",
            "The page you are looking for does not exist.",
        )),
    )
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/content - Site content.
async fn get_content(State(state): State<AppState>) -> Json<ContentResponse> {
    let content = &state.content;
    Json(ContentResponse {
        business: state.config.site.clone(),
        nav: NAV_LINKS.to_vec(),
        services: content.services.clone(),
        features: content.features.clone(),
        testimonials: content.testimonials.clone(),
        gallery: content.gallery.clone(),
    })
}

/// GET /api/visualizer - Illustration variants.
async fn list_variants(State(state): State<AppState>) -> Json<VariantListResponse> {
    let variants = state
        .catalogs
        .iter()
        .map(|catalog| VariantSummary {
            id: catalog.variant.id(),
            name: catalog.variant.display_name(),
            sections: catalog.section_ids(),
            presets: catalog.presets.iter().map(|p| p.name.clone()).collect(),
        })
        .collect();
    Json(VariantListResponse { variants })
}

/// GET /api/visualizer/{variant} - Swatch catalog.
async fn get_catalog(
    State(state): State<AppState>,
    Path(variant): Path<String>,
) -> ApiResult<VariantCatalog> {
    Ok(Json(catalog_for(&state, &variant)?.clone()))
}

/// GET /api/visualizer/{variant}/house.svg - Rendered illustration.
async fn house_svg(
    State(state): State<AppState>,
    Path(variant): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, Json<ApiError>)> {
    let catalog = catalog_for(&state, &variant)?;
    let visualizer = query::restore(catalog, &params).map_err(|e| query_error(&e))?;

    let active = match params.get("outline").map(String::as_str) {
        Some("none") => None,
        _ => Some(visualizer.active_section()),
    };
    let svg = render::render_house(catalog.variant, visualizer.applied(), active);
    let etag = etag_for(&svg);

    let fresh = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == etag);
    if fresh {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_string()),
            (header::CACHE_CONTROL, "no-cache".to_string()),
            (header::ETAG, etag),
        ],
        svg,
    )
        .into_response())
}

/// POST /api/visualizer/{variant}/actions - Apply a control action.
async fn visualizer_action(
    State(state): State<AppState>,
    Path(variant): Path<String>,
    Json(request): Json<ActionRequest>,
) -> ApiResult<ActionResponse> {
    let catalog = catalog_for(&state, &variant)?;
    let mut visualizer = match &request.state {
        Some(snapshot) => {
            ColorVisualizer::restore(catalog, snapshot).map_err(|e| visualizer_error(&e))?
        }
        None => ColorVisualizer::new(catalog),
    };

    visualizer
        .apply(&request.action, &mut OsRandom)
        .map_err(|e| visualizer_error(&e))?;
    debug!(variant = %catalog.variant, action = ?request.action, "Applied visualizer action");

    Ok(Json(ActionResponse {
        state: visualizer.snapshot(),
        selected_swatch: visualizer.selected_swatch().map(|o| o.name.clone()),
        matching_preset: visualizer.matching_preset().map(|p| p.name.clone()),
        svg: render::render_visualizer(&visualizer),
    }))
}

/// POST /api/contact - Contact form submission.
async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> impl IntoResponse {
    submit_lead(&state, LeadKind::Contact, form.validate()).await
}

/// POST /api/quote - Free quote request.
async fn submit_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> impl IntoResponse {
    submit_lead(&state, LeadKind::Quote, request.validate()).await
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the router with all pages and endpoints.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Pages
        .route("/", get(landing_page))
        .route("/quote", post(submit_quote_page))
        .route("/gallery", get(gallery_page))
        .route("/contact", get(contact_page).post(submit_contact_page))
        .route("/assets/{*path}", get(static_files::serve_asset))
        // Content
        .route("/api/content", get(get_content))
        // Visualizer endpoints
        .route("/api/visualizer", get(list_variants))
        .route("/api/visualizer/{variant}", get(get_catalog))
        .route("/api/visualizer/{variant}/house.svg", get(house_svg))
        .route("/api/visualizer/{variant}/actions", post(visualizer_action))
        // Lead forms
        .route("/api/contact", post(submit_contact))
        .route("/api/quote", post(submit_quote))
        .fallback(not_found_page)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the state cannot be built or the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    info!("Starting HousePaint web server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant() {
        assert_eq!(parse_variant("southwest").unwrap(), HouseVariant::Southwest);
        assert_eq!(parse_variant("Cottage").unwrap(), HouseVariant::Cottage);
        assert_eq!(parse_variant("igloo").unwrap_err().0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_etag_is_stable_and_quoted() {
        let a = etag_for("<svg/>");
        assert_eq!(a, etag_for("<svg/>"));
        assert_ne!(a, etag_for("<svg></svg>"));
        assert!(a.starts_with('"') && a.ends_with('"'));
        assert_eq!(a.len(), 66);
    }

    #[test]
    fn test_visualizer_error_status() {
        let (status, _) = visualizer_error(&VisualizerError::UnknownPreset("x".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = visualizer_error(&VisualizerError::UnknownSection {
            section: Section::Garage,
            variant: HouseVariant::Cottage,
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_form_view_keeps_values_on_failure() {
        let (status, view) = form_view(&LeadOutcome::Failed(LeadKind::Contact), "Jane", "j@x.io", "", "Hi");
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(view.name, "Jane");
        assert!(matches!(view.notice, Some(Notice::Error(_))));

        let (status, view) = form_view(&LeadOutcome::Sent(LeadKind::Quote, Uuid::nil()), "Jane", "j@x.io", "", "Hi");
        assert_eq!(status, StatusCode::OK);
        assert!(view.name.is_empty());
        assert_eq!(
            view.notice,
            Some(Notice::Success("Quote request sent! We'll get back to you soon.".to_string()))
        );
    }
}
