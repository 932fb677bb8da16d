// Directus REST client modules
//
// Transport mechanics (`client`) and the query parameter builder (`query`).
// Collection-specific reads live one layer up in `content`.

pub mod client;
pub mod query;

pub use client::DirectusClient;
pub use query::{Filter, PUBLISHED, Query};
