// Asset URLs
//
// `GET {base}assets/{file_id}?width=&height=&fit=&quality=`
// Image transforms happen on the asset server; this module only builds
// the URL. Parameters appear in that fixed order, and only when set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded;

/// How the asset server fits an image into `width` x `height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Cover,
    Contain,
    Inside,
    Outside,
}

impl Fit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cover" => Ok(Self::Cover),
            "contain" => Ok(Self::Contain),
            "inside" => Ok(Self::Inside),
            "outside" => Ok(Self::Outside),
            other => Err(format!(
                "unknown fit '{other}' (expected cover, contain, inside, or outside)"
            )),
        }
    }
}

/// Optional image transform. Unset fields are left out of the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: Option<Fit>,
    pub quality: Option<u8>,
}

impl AssetTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn fit(mut self, fit: Fit) -> Self {
        self.fit = Some(fit);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Query string without the leading `?`. Zero dimensions count as unset.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(width) = self.width.filter(|w| *w > 0) {
            query.append_pair("width", &width.to_string());
        }
        if let Some(height) = self.height.filter(|h| *h > 0) {
            query.append_pair("height", &height.to_string());
        }
        if let Some(fit) = self.fit {
            query.append_pair("fit", fit.as_str());
        }
        if let Some(quality) = self.quality.filter(|q| *q > 0) {
            query.append_pair("quality", &quality.to_string());
        }
        query.finish()
    }
}

/// Build the public URL of an asset.
///
/// `base` is the Directus origin (trailing slash expected, as produced by
/// [`DirectusClient::base_url`](crate::DirectusClient::base_url)). An empty
/// `file_id` yields an empty string regardless of `transform`.
pub fn asset_url(base: &Url, file_id: &str, transform: &AssetTransform) -> String {
    if file_id.is_empty() {
        return String::new();
    }

    let root = base.as_str().trim_end_matches('/');
    let query = transform.to_query();
    if query.is_empty() {
        format!("{root}/assets/{file_id}")
    } else {
        format!("{root}/assets/{file_id}?{query}")
    }
}
