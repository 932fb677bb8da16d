// Content client
//
// One read per website section, each a fixed Directus query. Reads are
// fail-soft: any error is reported to the diagnostics sink and replaced
// by an empty list or `None`, so a CMS outage renders as a missing
// section rather than an error page. The kontakt write is the exception
// and hands its error back to the caller.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::assets::{AssetTransform, asset_url};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::directus::{DirectusClient, Query};
use crate::error::Error;
use crate::models::{
    AboutPage, Belief, BlogPost, CoreValue, HeroSlide, HistoryEvent, Kontakt, KontaktPayload,
    NewKontakt, Organization, PageHeader, StaffMember, StoreInfo,
};
use crate::transport::TransportConfig;

/// Collection and singleton names in the Directus schema.
pub mod collections {
    pub const HERO_SLIDES: &str = "hero_slides";
    pub const STORE_INFO: &str = "store_info";
    pub const ORGANIZATIONS: &str = "organizations";
    pub const ABOUT_PAGE: &str = "about_page";
    pub const CORE_VALUES: &str = "core_values";
    pub const HISTORY_TIMELINE: &str = "history_timeline";
    pub const BELIEFS: &str = "beliefs";
    pub const STAFF_MEMBERS: &str = "staff_members";
    pub const STAFF_PAGE_HEADER: &str = "staff_page_header";
    pub const BLOG_POSTS: &str = "blog_posts";
    pub const BLOG_PAGE_HEADER: &str = "blog_page_header";
    pub const KONTAKT: &str = "kontakt";
}

/// The fixed query behind each read.
pub mod queries {
    use crate::directus::Query;

    const PAGE_HEADER_FIELDS: [&str; 3] = ["title", "subtitle", "background_image"];

    pub fn hero_slides() -> Query {
        Query::new()
            .fields([
                "id",
                "title",
                "subtitle",
                "image",
                "button_text",
                "button_link",
                "sort",
            ])
            .published()
            .sort(["sort", "date_created"])
    }

    pub fn store_info() -> Query {
        Query::new().all_fields()
    }

    pub fn organizations() -> Query {
        Query::new()
            .fields(["id", "title", "description", "icon", "color", "link", "sort"])
            .published()
            .sort(["sort"])
    }

    pub fn about_page() -> Query {
        Query::new().all_fields()
    }

    pub fn core_values() -> Query {
        Query::new()
            .fields(["id", "title", "description", "icon", "color", "sort"])
            .published()
            .sort(["sort"])
    }

    pub fn history_timeline() -> Query {
        Query::new()
            .fields(["id", "year", "title", "description", "sort"])
            .published()
            .sort(["sort"])
    }

    pub fn beliefs() -> Query {
        Query::new()
            .fields(["id", "title", "content", "sort"])
            .published()
            .sort(["sort"])
    }

    pub fn staff_members() -> Query {
        Query::new()
            .fields([
                "id", "name", "position", "bio", "email", "phone", "photo", "status", "sort",
            ])
            .published()
            .sort(["sort", "name"])
    }

    pub fn staff_page_header() -> Query {
        Query::new().fields(PAGE_HEADER_FIELDS)
    }

    pub fn blog_posts() -> Query {
        Query::new()
            .fields([
                "id",
                "title",
                "slug",
                "excerpt",
                "featured_image",
                "author",
                "published_date",
                "date_created",
            ])
            .published()
            .sort(["-published_date", "-date_created"])
    }

    pub fn blog_page_header() -> Query {
        Query::new().fields(PAGE_HEADER_FIELDS)
    }

    pub fn blog_post_by_slug(slug: &str) -> Query {
        Query::new()
            .all_fields()
            .filter_eq("slug", slug)
            .published()
            .limit(1)
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Typed, fail-soft access to the website's content.
///
/// Cheap to clone; clones share the connection pool and diagnostics sink.
#[derive(Clone)]
pub struct ContentClient {
    directus: DirectusClient,
    diagnostics: Arc<dyn Diagnostics>,
}

impl std::fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentClient")
            .field("base_url", &self.directus.base_url().as_str())
            .finish_non_exhaustive()
    }
}

impl ContentClient {
    /// Connect to `base_url`, logging recovered failures via `tracing`.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let directus = DirectusClient::new(base_url, transport)?;
        Ok(Self::with_diagnostics(directus, Arc::new(TracingDiagnostics)))
    }

    /// Wrap an existing Directus client with a custom diagnostics sink.
    pub fn with_diagnostics(directus: DirectusClient, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            directus,
            diagnostics,
        }
    }

    pub fn directus(&self) -> &DirectusClient {
        &self.directus
    }

    /// Forward a handled failure to the diagnostics sink.
    pub fn report(&self, operation: &str, error: &(dyn std::error::Error + 'static)) {
        self.diagnostics.report(operation, error);
    }

    // ── Fail-soft helpers ────────────────────────────────────────────

    async fn list<T: DeserializeOwned>(
        &self,
        operation: &str,
        collection: &str,
        query: Query,
    ) -> Vec<T> {
        match self.directus.read_items(collection, &query).await {
            Ok(items) => {
                debug!(operation, count = items.len(), "fetched collection");
                items
            }
            Err(e) => {
                self.report(operation, &e);
                Vec::new()
            }
        }
    }

    async fn singleton<T: DeserializeOwned>(
        &self,
        operation: &str,
        collection: &str,
        query: Query,
    ) -> Option<T> {
        match self.directus.read_singleton(collection, &query).await {
            Ok(item) => item,
            Err(e) => {
                self.report(operation, &e);
                None
            }
        }
    }

    // ━━ Reads ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Published homepage slides by `sort`, then creation time.
    pub async fn hero_slides(&self) -> Vec<HeroSlide> {
        self.list("hero_slides", collections::HERO_SLIDES, queries::hero_slides())
            .await
    }

    pub async fn store_info(&self) -> Option<StoreInfo> {
        self.singleton("store_info", collections::STORE_INFO, queries::store_info())
            .await
    }

    pub async fn organizations(&self) -> Vec<Organization> {
        self.list(
            "organizations",
            collections::ORGANIZATIONS,
            queries::organizations(),
        )
        .await
    }

    pub async fn about_page(&self) -> Option<AboutPage> {
        self.singleton("about_page", collections::ABOUT_PAGE, queries::about_page())
            .await
    }

    pub async fn core_values(&self) -> Vec<CoreValue> {
        self.list("core_values", collections::CORE_VALUES, queries::core_values())
            .await
    }

    pub async fn history_timeline(&self) -> Vec<HistoryEvent> {
        self.list(
            "history_timeline",
            collections::HISTORY_TIMELINE,
            queries::history_timeline(),
        )
        .await
    }

    pub async fn beliefs(&self) -> Vec<Belief> {
        self.list("beliefs", collections::BELIEFS, queries::beliefs())
            .await
    }

    /// Published staff by `sort`, then name.
    pub async fn staff_members(&self) -> Vec<StaffMember> {
        self.list(
            "staff_members",
            collections::STAFF_MEMBERS,
            queries::staff_members(),
        )
        .await
    }

    pub async fn staff_page_header(&self) -> Option<PageHeader> {
        self.singleton(
            "staff_page_header",
            collections::STAFF_PAGE_HEADER,
            queries::staff_page_header(),
        )
        .await
    }

    /// Published posts, newest first.
    pub async fn blog_posts(&self) -> Vec<BlogPost> {
        self.list("blog_posts", collections::BLOG_POSTS, queries::blog_posts())
            .await
    }

    pub async fn blog_page_header(&self) -> Option<PageHeader> {
        self.singleton(
            "blog_page_header",
            collections::BLOG_PAGE_HEADER,
            queries::blog_page_header(),
        )
        .await
    }

    /// The published post with exactly this slug, if any.
    pub async fn blog_post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        self.list::<BlogPost>(
            "blog_post_by_slug",
            collections::BLOG_POSTS,
            queries::blog_post_by_slug(slug),
        )
        .await
        .into_iter()
        .next()
    }

    // ━━ Write ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Store a contact submission with status `"new"`.
    ///
    /// Fields are forwarded as given. Unlike the reads, errors are returned
    /// so the submitter learns the message was not stored. `Ok(None)` means
    /// the CMS stored it but did not return the record.
    pub async fn submit_kontakt(&self, kontakt: &NewKontakt) -> Result<Option<Kontakt>, Error> {
        let payload = KontaktPayload::from(kontakt);
        self.directus
            .create_item(collections::KONTAKT, &payload)
            .await
    }

    // ━━ Assets ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Public URL for an asset on this instance. See [`asset_url`].
    pub fn asset_url(&self, file_id: &str, transform: &AssetTransform) -> String {
        asset_url(self.directus.base_url(), file_id, transform)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::directus::PUBLISHED;

    fn published_lists() -> Vec<(&'static str, Query)> {
        vec![
            ("hero_slides", queries::hero_slides()),
            ("organizations", queries::organizations()),
            ("core_values", queries::core_values()),
            ("history_timeline", queries::history_timeline()),
            ("beliefs", queries::beliefs()),
            ("staff_members", queries::staff_members()),
            ("blog_posts", queries::blog_posts()),
            ("blog_post_by_slug", queries::blog_post_by_slug("x")),
        ]
    }

    #[test]
    fn every_collection_read_is_gated_on_published() {
        for (name, query) in published_lists() {
            assert_eq!(
                query.filter().get("status"),
                Some(&Value::from(PUBLISHED)),
                "{name} must filter on published status"
            );
        }
    }

    #[test]
    fn singletons_have_no_status_filter() {
        for query in [
            queries::store_info(),
            queries::about_page(),
            queries::staff_page_header(),
            queries::blog_page_header(),
        ] {
            assert!(query.filter().is_empty());
        }
    }

    #[test]
    fn documented_sort_keys() {
        assert_eq!(queries::hero_slides().sort_keys(), ["sort", "date_created"]);
        assert_eq!(queries::staff_members().sort_keys(), ["sort", "name"]);
        assert_eq!(
            queries::blog_posts().sort_keys(),
            ["-published_date", "-date_created"]
        );
        assert_eq!(queries::beliefs().sort_keys(), ["sort"]);
    }

    #[test]
    fn slug_lookup_is_limited_to_one() {
        let query = queries::blog_post_by_slug("fairer-kaffee");
        assert_eq!(query.limit_value(), Some(1));
        assert_eq!(query.filter().get("slug"), Some(&Value::from("fairer-kaffee")));
        assert_eq!(query.field_list(), ["*"]);
    }
}
