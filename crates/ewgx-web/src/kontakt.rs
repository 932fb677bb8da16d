// POST /api/kontakt
//
// parse → presence check → email check → store. Validation failures are
// 400 and never touch the CMS; anything that goes wrong after that is a
// 500 whose body carries only the generic message.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use ewgx_api::Kontakt;

use crate::AppState;
use crate::validation::{KontaktForm, Rejection};

/// User-facing messages. German only.
pub mod messages {
    pub const MISSING_FIELDS: &str = "Bitte füllen Sie alle erforderlichen Felder aus.";
    pub const INVALID_EMAIL: &str = "Bitte geben Sie eine gültige E-Mail-Adresse ein.";
    pub const THANK_YOU: &str =
        "Vielen Dank für Ihre Nachricht! Wir werden uns bald bei Ihnen melden.";
    pub const FAILURE: &str =
        "Es ist ein Fehler aufgetreten. Bitte versuchen Sie es später erneut.";
}

/// Body of every `/api/kontakt` response.
///
/// `data` is the stored record when the CMS returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Kontakt>,
}

impl SubmissionResponse {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_owned(),
            data: None,
        }
    }
}

impl From<Rejection> for SubmissionResponse {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::MissingFields => Self::failure(messages::MISSING_FIELDS),
            Rejection::InvalidEmail => Self::failure(messages::INVALID_EMAIL),
        }
    }
}

pub(crate) async fn submit(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<SubmissionResponse>) {
    let form: KontaktForm = match serde_json::from_slice(&body) {
        Ok(form) => form,
        Err(e) => {
            state.content.report("kontakt", &e);
            return internal_error();
        }
    };

    let kontakt = match form.validate() {
        Ok(kontakt) => kontakt,
        Err(rejection) => {
            return (StatusCode::BAD_REQUEST, Json(rejection.into()));
        }
    };

    match state.content.submit_kontakt(&kontakt).await {
        Ok(created) => {
            let id = created.as_ref().and_then(Kontakt::id);
            info!(id = id.map(tracing::field::display), "stored contact submission");
            (
                StatusCode::OK,
                Json(SubmissionResponse {
                    success: true,
                    message: messages::THANK_YOU.to_owned(),
                    data: created,
                }),
            )
        }
        Err(e) => {
            state.content.report("kontakt", &e);
            internal_error()
        }
    }
}

fn internal_error() -> (StatusCode, Json<SubmissionResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmissionResponse::failure(messages::FAILURE)),
    )
}
