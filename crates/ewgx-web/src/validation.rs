// Contact form validation
//
// Two checks, in order: every required field is present, then the email
// has the shape `local@domain.tld`. Values that pass are forwarded exactly
// as received.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use ewgx_api::NewKontakt;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Why a submission was turned away before reaching the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// name, email, subject, or message is absent or blank.
    MissingFields,
    /// email does not look like `local@domain.tld`.
    InvalidEmail,
}

/// Inbound form body. Unknown keys (`id`, `status`, ...) are ignored.
///
/// Only JSON strings count as values: `null`, numbers, booleans and
/// nested structures read as absent, so they fail the presence check.
#[derive(Debug, Default, Deserialize)]
pub struct KontaktForm {
    #[serde(default, deserialize_with = "text_only")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub message: Option<String>,
}

fn text_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

impl KontaktForm {
    pub fn validate(self) -> Result<NewKontakt, Rejection> {
        let (Some(name), Some(email), Some(subject), Some(message)) = (
            required(self.name),
            required(self.email),
            required(self.subject),
            required(self.message),
        ) else {
            return Err(Rejection::MissingFields);
        };

        if !is_valid_email(&email) {
            return Err(Rejection::InvalidEmail);
        }

        Ok(NewKontakt {
            name,
            email,
            phone: self.phone.filter(|p| !p.is_empty()),
            subject,
            message,
        })
    }
}
