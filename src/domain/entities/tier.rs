//! Cache tier classification.

use std::fmt;

/// Where the image engine reports a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineSource {
    /// In-process decoded image cache.
    MemoryCache,
    /// Raw source bytes persisted on disk.
    DataDiskCache,
    /// Decoded, transformed resource persisted on disk.
    ResourceDiskCache,
    /// Bundled asset store.
    Local,
    /// Network fetch.
    Remote,
}

/// Tier reported to callers as having satisfied a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTier {
    /// Bundled asset.
    Local,
    /// Memory cache hit.
    Memory,
    /// Raw data found on disk.
    DiskData,
    /// Transformed resource found on disk.
    DiskResource,
    /// Fetched from the network.
    Network,
}

impl CacheTier {
    /// Tag used in load notifications. Both disk tiers share `DISK`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Memory => "MEMORY",
            Self::DiskData | Self::DiskResource => "DISK",
            Self::Network => "NETWORK",
        }
    }

    /// Distinct machine-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Memory => "memory",
            Self::DiskData => "disk_data",
            Self::DiskResource => "disk_resource",
            Self::Network => "network",
        }
    }

    /// Returns true for either disk tier.
    #[must_use]
    pub const fn is_disk(self) -> bool {
        matches!(self, Self::DiskData | Self::DiskResource)
    }
}

impl fmt::Display for CacheTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful load of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Tier that satisfied the request.
    pub tier: CacheTier,
    /// Identifying token of the resolved target.
    pub token: String,
}
