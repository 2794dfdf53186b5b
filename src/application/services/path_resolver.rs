//! Maps remote image URLs onto the bundled asset tree.

use tracing::trace;

use crate::domain::ports::AssetStorePort;

/// Root segment every bundled asset path starts with.
pub const LOCAL_ASSET_ROOT: &str = "blasted-image/";

/// Query fragment marking a media download; everything from it onward is dropped.
const MEDIA_MARKER: &str = "?alt=media";

/// Derives the bundled asset path for `remote_url`.
///
/// Strips `cloud_prefix`, cuts the URL at the media marker and turns escaped
/// `%2F` separators back into `/`. No other percent-decoding is done. When the
/// URL does not start with the prefix the path is derived from the whole URL
/// and will simply not exist in the store.
#[must_use]
pub fn extract_local_path(remote_url: &str, cloud_prefix: &str) -> String {
    let relative = remote_url.strip_prefix(cloud_prefix).unwrap_or(remote_url);
    let relative = relative
        .split_once(MEDIA_MARKER)
        .map_or(relative, |(path, _)| path);

    format!("{LOCAL_ASSET_ROOT}{}", relative.replace("%2F", "/"))
}

/// Returns true if `path` can be opened from the asset store.
///
/// Every probe failure counts as "not present".
pub fn exists_as_local_asset(store: &dyn AssetStorePort, path: &str) -> bool {
    match store.probe(path) {
        Ok(()) => true,
        Err(e) => {
            trace!(path = %path, error = %e, "Asset probe failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::InMemoryAssets;
    use test_case::test_case;

    const PREFIX: &str = "https://cdn.example.com/media/";

    #[test_case("https://cdn.example.com/media/img.png", "blasted-image/img.png" ; "plain")]
    #[test_case("https://cdn.example.com/media/img.png?alt=media&token=x", "blasted-image/img.png" ; "media_marker")]
    #[test_case("https://cdn.example.com/media/icons%2Fsmall%2Fa.png?alt=media", "blasted-image/icons/small/a.png" ; "escaped_separators")]
    #[test_case("https://cdn.example.com/media/a%20b.png", "blasted-image/a%20b.png" ; "other_escapes_kept")]
    #[test_case("https://cdn.example.com/media/a.png?size=2", "blasted-image/a.png?size=2" ; "other_query_kept")]
    fn test_extract_local_path(url: &str, expected: &str) {
        assert_eq!(extract_local_path(url, PREFIX), expected);
    }

    #[test]
    fn test_missing_prefix_is_noop() {
        assert_eq!(
            extract_local_path("https://other.example.com/img.png", PREFIX),
            "blasted-image/https://other.example.com/img.png"
        );
        assert_eq!(extract_local_path("img.png", ""), "blasted-image/img.png");
    }

    #[test]
    fn test_probe_failures_fold_into_absent() {
        let store = InMemoryAssets::with_paths(["blasted-image/img.png"]);
        assert!(exists_as_local_asset(&store, "blasted-image/img.png"));
        assert!(!exists_as_local_asset(&store, "blasted-image/other.png"));

        let broken = InMemoryAssets::broken();
        assert!(!exists_as_local_asset(&broken, "blasted-image/img.png"));
    }
}
