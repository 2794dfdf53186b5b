//! Decides whether an image is fetched from bundled assets or the network.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{FetchDescriptor, FetchTarget, Headers};
use crate::domain::event::BlastedEvent;
use crate::domain::ports::{AssetStorePort, EventNotifierPort};

use super::path_resolver::{exists_as_local_asset, extract_local_path};

/// Builds fetch descriptors, preferring bundled assets when asked to.
#[derive(Clone)]
pub struct RequestBuilder {
    assets: Arc<dyn AssetStorePort>,
    notifier: Arc<dyn EventNotifierPort>,
}

impl RequestBuilder {
    /// Creates a builder probing `assets` and reporting through `notifier`.
    #[must_use]
    pub fn new(assets: Arc<dyn AssetStorePort>, notifier: Arc<dyn EventNotifierPort>) -> Self {
        Self { assets, notifier }
    }

    /// Resolves `url` into a descriptor.
    ///
    /// With `prefer_local_assets` the bundled asset derived from `url` and
    /// `cloud_prefix` wins when present; otherwise the remote URL is used with
    /// `headers` attached. Resolution never fails: probe faults fall through to
    /// the remote branch.
    #[must_use]
    pub fn resolve(
        &self,
        url: &str,
        headers: Option<&Headers>,
        prefer_local_assets: bool,
        cloud_prefix: Option<&str>,
        verbose: bool,
    ) -> FetchDescriptor {
        let remote = || FetchTarget::remote(url, headers.cloned().unwrap_or_default());

        if !prefer_local_assets {
            self.log(verbose, format!("Local assets disabled. Use remote url: {url}"));
            return FetchDescriptor::new(remote());
        }

        let local_path = extract_local_path(url, cloud_prefix.unwrap_or_default());
        let target = if exists_as_local_asset(self.assets.as_ref(), &local_path) {
            self.log(
                verbose,
                format!("Image is in local assets. Local url: {local_path}"),
            );
            FetchTarget::local(local_path)
        } else {
            self.log(
                verbose,
                format!(
                    "Image is not in local assets (Use URL). Local url: {local_path}. Remote url: {url}"
                ),
            );
            remote()
        };

        debug!(fetch_target = %target, "Resolved fetch target");
        FetchDescriptor::new(target)
    }

    fn log(&self, verbose: bool, message: String) {
        if verbose {
            self.notifier.emit(&BlastedEvent::log(message));
        }
    }
}
