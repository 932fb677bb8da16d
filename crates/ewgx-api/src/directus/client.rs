// Async HTTP client for the Directus REST API.
//
// Base path: /items/{collection}
// Auth: none (public read, public create)
//
// Every response is wrapped in `{ "data": ... }`; failures carry
// `{ "errors": [{ "message", "extensions": { "code" } }] }`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::query::Query;
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Response envelopes ───────────────────────────────────────────────

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    extensions: Option<ErrorExtensions>,
}

#[derive(Deserialize)]
struct ErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

// ── Client ───────────────────────────────────────────────────────────

/// Raw client for a Directus instance.
///
/// Propagates every failure as [`Error`]. Holds no per-call state, so a
/// single instance can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct DirectusClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DirectusClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends in `/` so relative joins keep any path prefix.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// The normalized instance root (always ends in `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn items_url(&self, collection: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("items/{collection}"))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url, query: &Query) -> Result<T, Error> {
        let params = query.to_params()?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(&params).send().await?;
        self.handle_response(resp).await
    }

    /// POST that tolerates an empty success body (`204 No Content`).
    ///
    /// Directus answers a create with 204 when the caller may create but
    /// not read the collection.
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Option<T>, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        let body = self.success_body(resp).await?;
        if body.trim().is_empty() {
            debug!("empty create response");
            return Ok(None);
        }
        decode(body).map(Some)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        decode(self.success_body(resp).await?)
    }

    /// The raw body of a 2xx response, or the parsed Directus error.
    async fn success_body(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp.text().await?)
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let first = serde_json::from_str::<ErrorEnvelope>(&raw)
            .ok()
            .and_then(|envelope| envelope.errors.into_iter().next());

        if let Some(entry) = first {
            Error::Api {
                status: status.as_u16(),
                message: entry.message.unwrap_or_else(|| status.to_string()),
                code: entry.extensions.and_then(|ext| ext.code),
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            }
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /items/{collection}`: list items matching `query`.
    pub async fn read_items<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<T>, Error> {
        let url = self.items_url(collection)?;
        let envelope: DataEnvelope<Vec<T>> = self.get(url, query).await?;
        Ok(envelope.data)
    }

    /// `GET /items/{singleton}`: the singleton record, or `None` if unset.
    pub async fn read_singleton<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Option<T>, Error> {
        let url = self.items_url(collection)?;
        let envelope: DataEnvelope<Option<T>> = self.get(url, query).await?;
        Ok(envelope.data)
    }

    /// `POST /items/{collection}`: create one item.
    ///
    /// Returns the item as stored, or `None` when the CMS confirmed the
    /// create without returning it (204, empty body, or `data: null`).
    pub async fn create_item<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        collection: &str,
        item: &B,
    ) -> Result<Option<T>, Error> {
        let url = self.items_url(collection)?;
        let envelope: Option<DataEnvelope<Option<T>>> = self.post(url, item).await?;
        Ok(envelope.and_then(|e| e.data))
    }
}
