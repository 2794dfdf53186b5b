//! Inputs consumed by an external display widget.
//!
//! The widget itself lives outside this crate; these types pin down the
//! values it receives so hosts normalize them the same way.

use serde::Deserialize;

/// Size used when a width or height is missing or non-positive.
pub const DEFAULT_VIEW_DIMENSION: u32 = 100;

/// How an image is fitted into its view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResizeMode {
    /// Scale uniformly to fit inside the view.
    Contain,
    /// Scale each axis independently to fill the view.
    Stretch,
    /// Scale uniformly to fill the view, cropping overflow.
    #[default]
    Cover,
    /// No scaling; centered.
    Center,
}

/// Scaling strategy the widget applies for a [`ResizeMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleStrategy {
    /// Uniform fit, centered.
    FitCenter,
    /// Independent x/y fill.
    FitXy,
    /// Uniform fill, centered crop.
    CenterCrop,
    /// Unscaled, centered.
    Center,
}

impl ResizeMode {
    /// Parses a host-supplied mode. Missing, empty, `undefined` or unknown
    /// values fall back to `cover`.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("contain") => Self::Contain,
            Some("stretch") => Self::Stretch,
            Some("center") => Self::Center,
            _ => Self::Cover,
        }
    }

    /// Host-facing name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contain => "contain",
            Self::Stretch => "stretch",
            Self::Cover => "cover",
            Self::Center => "center",
        }
    }

    /// Strategy the widget uses for this mode.
    #[must_use]
    pub const fn scale_strategy(self) -> ScaleStrategy {
        match self {
            Self::Contain => ScaleStrategy::FitCenter,
            Self::Stretch => ScaleStrategy::FitXy,
            Self::Cover => ScaleStrategy::CenterCrop,
            Self::Center => ScaleStrategy::Center,
        }
    }
}

/// Normalized view dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSize {
    /// Width in layout units.
    pub width: u32,
    /// Height in layout units.
    pub height: u32,
}

impl ViewSize {
    /// Creates a size, replacing non-positive values with the fallback.
    #[must_use]
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width: normalize_dimension(width),
            height: normalize_dimension(height),
        }
    }
}

impl Default for ViewSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEW_DIMENSION,
            height: DEFAULT_VIEW_DIMENSION,
        }
    }
}

fn normalize_dimension(value: i64) -> u32 {
    if value <= 0 {
        return DEFAULT_VIEW_DIMENSION;
    }
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Source a widget binds to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    /// Image URL.
    #[serde(alias = "uri")]
    pub url: String,
    /// Try bundled assets before the network.
    #[serde(default, alias = "hybridAssets")]
    pub prefer_local_assets: bool,
    /// Remote prefix mapped onto the bundled asset root.
    #[serde(default, alias = "cloudUrl")]
    pub cloud_prefix: Option<String>,
}

impl SourceDescriptor {
    /// Plain remote source.
    #[must_use]
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prefer_local_assets: false,
            cloud_prefix: None,
        }
    }

    /// Source that prefers bundled assets under `cloud_prefix`.
    #[must_use]
    pub fn hybrid(url: impl Into<String>, cloud_prefix: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prefer_local_assets: true,
            cloud_prefix: Some(cloud_prefix.into()),
        }
    }
}
