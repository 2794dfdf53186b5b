//! Domain layer with core entities, errors and port definitions.

/// Display-binding inputs for an external widget.
pub mod display;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Outbound notifications.
pub mod event;
/// Port definitions.
pub mod ports;

pub use entities::{CacheTier, FetchDescriptor, FetchTarget, Headers, LoadOutcome};
pub use errors::{CacheError, ImageError};
pub use event::{BlastedEvent, EventKind};
pub use ports::{AssetStorePort, EventNotifierPort, ImageEnginePort, SchedulerPort};
