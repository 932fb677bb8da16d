// Directus query parameters
//
// Builds the `fields`, `filter`, `sort`, and `limit` parameters understood
// by `GET /items/{collection}`. Filters are equality-only and serialize in
// insertion order so the rendered query string is deterministic.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::Error;

/// Field value every public collection is gated on.
pub const PUBLISHED: &str = "published";

// ── Filter ───────────────────────────────────────────────────────────

/// Conjunction of `field == value` predicates.
///
/// Serializes to the Directus filter DSL:
/// ```json
/// { "slug": { "_eq": "hello" }, "status": { "_eq": "published" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Add (or replace) an equality predicate on `field`.
    pub fn insert_eq(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        if let Some(existing) = self.clauses.iter_mut().find(|(f, _)| *f == field) {
            existing.1 = value;
        } else {
            self.clauses.push((field, value));
        }
    }

    /// The value a field is pinned to, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.clauses
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }
}

struct EqClause<'a>(&'a Value);

impl Serialize for EqClause<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("_eq", self.0)?;
        map.end()
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.clauses.len()))?;
        for (field, value) in &self.clauses {
            map.serialize_entry(field, &EqClause(value))?;
        }
        map.end()
    }
}

// ── Query ────────────────────────────────────────────────────────────

/// Query against a Directus collection or singleton.
///
/// Sort keys follow the Directus convention: a leading `-` sorts
/// descending, anything else ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    fields: Vec<String>,
    filter: Filter,
    sort: Vec<String>,
    limit: Option<u32>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select exactly these fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Select every field (`fields=*`).
    pub fn all_fields(self) -> Self {
        self.fields(["*"])
    }

    /// Require `field == value`.
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert_eq(field, value);
        self
    }

    /// Require `status == "published"`.
    pub fn published(self) -> Self {
        self.filter_eq("status", PUBLISHED)
    }

    pub fn sort<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn field_list(&self) -> &[String] {
        &self.fields
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn sort_keys(&self) -> &[String] {
        &self.sort
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    /// Render as query-string pairs. Empty parts are omitted.
    pub fn to_params(&self) -> Result<Vec<(&'static str, String)>, Error> {
        let mut params = Vec::with_capacity(4);
        if !self.fields.is_empty() {
            params.push(("fields", self.fields.join(",")));
        }
        if !self.filter.is_empty() {
            params.push(("filter", serde_json::to_string(&self.filter)?));
        }
        if !self.sort.is_empty() {
            params.push(("sort", self.sort.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        Ok(params)
    }
}
