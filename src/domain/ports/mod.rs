mod asset_store_port;
mod event_notifier_port;
mod image_engine_port;
mod scheduler_port;

pub use asset_store_port::AssetStorePort;
pub use event_notifier_port::EventNotifierPort;
pub use image_engine_port::ImageEnginePort;
pub use scheduler_port::{SchedulerPort, Work};

#[cfg(test)]
pub mod mocks {
    pub use super::asset_store_port::mock::InMemoryAssets;
    pub use super::event_notifier_port::mock::RecordingNotifier;
    pub use super::image_engine_port::mock::ScriptedEngine;
    pub use super::scheduler_port::mock::{Context, InlineScheduler};
}
