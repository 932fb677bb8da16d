// ewgx-api: Async Rust client for the EWGX Directus content backend

pub mod assets;
pub mod content;
pub mod diagnostics;
pub mod directus;
pub mod error;
pub mod models;
pub mod transport;

pub use assets::{AssetTransform, Fit, asset_url};
pub use content::ContentClient;
pub use diagnostics::{Diagnostics, SilentDiagnostics, TracingDiagnostics};
pub use directus::{DirectusClient, Query};
pub use error::Error;
pub use models::{
    AboutPage, Belief, BlogPost, CoreValue, HeroSlide, HistoryEvent, ItemId, Kontakt,
    KONTAKT_STATUS_NEW, NewKontakt, OpeningHours, Organization, PageHeader, StaffMember,
    StoreInfo,
};
pub use transport::{TlsMode, TransportConfig};
