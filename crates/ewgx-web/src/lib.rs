//! HTTP surface for the EWGX website backend.
//!
//! A single route today: `POST /api/kontakt`, which validates a contact
//! form and stores it in the CMS through [`ewgx_api::ContentClient`].

use axum::{Router, routing::post};

use ewgx_api::ContentClient;

pub mod kontakt;
pub mod validation;

pub use kontakt::{SubmissionResponse, messages};

/// Route of the contact submission endpoint.
pub const KONTAKT_ROUTE: &str = "/api/kontakt";

/// Shared handler state. Cloned per request; the client is pooled inside.
#[derive(Debug, Clone)]
pub struct AppState {
    pub content: ContentClient,
}

/// Build the HTTP router around a content client.
pub fn build_router(content: ContentClient) -> Router {
    Router::new()
        .route(KONTAKT_ROUTE, post(kontakt::submit))
        .with_state(AppState { content })
}
