//! Load request and preload report DTOs.

use serde::Deserialize;

use crate::domain::display::SourceDescriptor;
use crate::domain::entities::Headers;

/// One image to load or preload.
///
/// Combines header attachment and bundled-asset fallback: headers are only
/// sent when the request ends up going to the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequest {
    /// Image URL.
    #[serde(alias = "uri")]
    pub url: String,
    /// Custom headers for the remote fetch.
    #[serde(default)]
    pub headers: Option<Headers>,
    /// Keep the result out of the memory tier.
    #[serde(default)]
    pub skip_memory_cache: bool,
    /// Try bundled assets before the network.
    #[serde(default, alias = "hybridAssets")]
    pub prefer_local_assets: bool,
    /// Remote prefix mapped onto the bundled asset root.
    #[serde(default, alias = "cloudUrl")]
    pub cloud_prefix: Option<String>,
}

impl LoadRequest {
    /// Creates a plain remote request.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Attaches custom headers.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Sets the memory-cache bypass.
    #[must_use]
    pub fn skip_memory_cache(mut self, skip: bool) -> Self {
        self.skip_memory_cache = skip;
        self
    }

    /// Prefers bundled assets derived through `cloud_prefix`.
    #[must_use]
    pub fn prefer_local_assets(mut self, cloud_prefix: impl Into<String>) -> Self {
        self.prefer_local_assets = true;
        self.cloud_prefix = Some(cloud_prefix.into());
        self
    }
}

impl From<SourceDescriptor> for LoadRequest {
    fn from(source: SourceDescriptor) -> Self {
        Self {
            url: source.url,
            headers: None,
            skip_memory_cache: false,
            prefer_local_assets: source.prefer_local_assets,
            cloud_prefix: source.cloud_prefix,
        }
    }
}

/// Summary of a batch preload. Failures are counted, never propagated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadReport {
    /// Images fetched and cached.
    pub loaded: usize,
    /// Images whose load failed.
    pub failed: usize,
}

impl PreloadReport {
    /// Number of requests handled.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.loaded + self.failed
    }
}
