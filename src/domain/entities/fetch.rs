//! Fetch descriptors: where and how one image is obtained.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Scheme used to build the identifying token of a bundled asset.
pub const LOCAL_ASSET_SCHEME: &str = "asset:///";

/// Custom request headers attached to a remote fetch.
///
/// Keys are unique; inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    /// Creates an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds headers from arbitrary JSON values, coercing each value to text.
    #[must_use]
    pub fn from_values<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        entries
            .into_iter()
            .map(|(key, value)| (key, Self::coerce(&value)))
            .collect()
    }

    /// Best-effort string coercion of a header value.
    #[must_use]
    pub fn coerce(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Inserts a header, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no headers are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (key, value) in iter {
            headers.insert(key, value);
        }
        headers
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_values(raw))
    }
}

/// Resolved source of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    /// Path inside the bundled asset store.
    Local(String),
    /// Remote location fetched over the network.
    Remote {
        /// Original request URL.
        url: String,
        /// Custom headers sent with the request.
        headers: Headers,
    },
}

impl FetchTarget {
    /// Creates a local asset target.
    #[must_use]
    pub fn local(path: impl Into<String>) -> Self {
        Self::Local(path.into())
    }

    /// Creates a remote target.
    #[must_use]
    pub fn remote(url: impl Into<String>, headers: Headers) -> Self {
        Self::Remote {
            url: url.into(),
            headers,
        }
    }

    /// Returns true for bundled asset targets.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Token identifying this target in notifications and cache keys.
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Local(path) => format!("{LOCAL_ASSET_SCHEME}{path}"),
            Self::Remote { url, .. } => url.clone(),
        }
    }

    /// Headers of a remote target.
    #[must_use]
    pub const fn headers(&self) -> Option<&Headers> {
        match self {
            Self::Local(_) => None,
            Self::Remote { headers, .. } => Some(headers),
        }
    }
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Unit of work submitted to the image engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDescriptor {
    target: FetchTarget,
    skip_memory_cache: bool,
}

impl FetchDescriptor {
    /// Creates a descriptor that may be retained in memory.
    #[must_use]
    pub const fn new(target: FetchTarget) -> Self {
        Self {
            target,
            skip_memory_cache: false,
        }
    }

    /// Returns the descriptor with the memory-cache bypass set to `skip`.
    #[must_use]
    pub fn with_skip_memory_cache(mut self, skip: bool) -> Self {
        self.skip_memory_cache = skip;
        self
    }

    /// The resolved target.
    #[must_use]
    pub const fn target(&self) -> &FetchTarget {
        &self.target
    }

    /// Whether a successful fetch must stay out of the memory tier.
    #[must_use]
    pub const fn skip_memory_cache(&self) -> bool {
        self.skip_memory_cache
    }
}
