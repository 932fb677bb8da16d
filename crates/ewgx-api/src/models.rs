// Content models
//
// One plain data contract per Directus collection. Fields mirror what the
// content queries select; nullable CMS fields are `Option`. Singletons
// fetched with `fields=*` keep unmodelled columns in `extra`.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Identifiers ──────────────────────────────────────────────────────

/// Primary key of a Directus item.
///
/// Collections keyed by auto-increment integers and collections keyed by
/// UUID strings both appear in the schema; callers treat either opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// `null` and a missing key both become an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Text column that may arrive as a string, a number, or `null`.
///
/// Numbers and booleans keep their JSON spelling; `null`, arrays and
/// objects become `None`. One odd row must not fail the whole list.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

// ── Homepage ─────────────────────────────────────────────────────────

/// Homepage carousel slide (`hero_slides`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subtitle: Option<String>,
    /// Asset file ID; pass through [`asset_url`](crate::asset_url).
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub button_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub button_link: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

/// One row of the store's opening hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub days: String,
    pub hours: String,
}

/// Store contact details and opening hours (`store_info` singleton).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub store_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub street: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_secondary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fax: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub opening_hours: Vec<OpeningHours>,
    /// Columns added in the CMS after this model was written.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partner organization card (`organizations`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

// ── About page ───────────────────────────────────────────────────────

/// About page copy (`about_page` singleton).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutPage {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub header_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub header_subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub header_background_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mission_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mission_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub vision_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub vision_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mission_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub history_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub history_subtitle: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `core_values`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreValue {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub color: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

/// Timeline entry (`history_timeline`). `year` is free text ("seit 1985").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

/// Statement-of-faith paragraph (`beliefs`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Belief {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

// ── Staff ────────────────────────────────────────────────────────────

/// `staff_members`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

/// Title block shared by the staff and blog index pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHeader {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub background_image: Option<String>,
}

// ── Blog ─────────────────────────────────────────────────────────────

/// `blog_posts`. List reads leave `content` unset; the slug lookup fills it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub excerpt: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub featured_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub published_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_created: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Kontakt ──────────────────────────────────────────────────────────

/// Status assigned to every new contact submission.
pub const KONTAKT_STATUS_NEW: &str = "new";

/// Caller-supplied contact form fields.
///
/// Carries no `id` or `status`; the CMS assigns the id and the status is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewKontakt {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Body sent to `POST /items/kontakt`.
#[derive(Debug, Serialize)]
pub(crate) struct KontaktPayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    pub subject: &'a str,
    pub message: &'a str,
    pub status: &'static str,
}

impl<'a> From<&'a NewKontakt> for KontaktPayload<'a> {
    fn from(k: &'a NewKontakt) -> Self {
        Self {
            name: &k.name,
            email: &k.email,
            phone: k.phone.as_deref(),
            subject: &k.subject,
            message: &k.message,
            status: KONTAKT_STATUS_NEW,
        }
    }
}

/// A stored contact submission, exactly as the CMS returned it.
///
/// Kept as the raw JSON object so it reaches the submitter unchanged;
/// which columns come back depends on the public role's read permissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kontakt(Map<String, Value>);

impl Kontakt {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Primary key, if the CMS returned one.
    pub fn id(&self) -> Option<ItemId> {
        ItemId::deserialize(self.get("id")?).ok()
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status")?.as_str()
    }

    /// `date_created` as UTC. Timestamps without an offset are read as UTC.
    pub fn date_created(&self) -> Option<DateTime<Utc>> {
        let raw = self.get("date_created")?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|dt| dt.and_utc())
            })
            .ok()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Kontakt {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
