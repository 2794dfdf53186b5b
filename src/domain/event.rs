//! Outbound notifications sent to the host listener.

use std::fmt;

/// Tag prefixed to every notification message.
pub const MODULE_TAG: &str = "BlastedImage";

/// Notification channel an event is published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Diagnostic message along the resolution path.
    Log,
    /// A load finished; carries the tier and target token.
    Loaded,
    /// Memory tier cleared.
    ClearedMemory,
    /// Disk tier cleared.
    ClearedDisk,
    /// Both tiers cleared.
    ClearedAll,
}

impl EventKind {
    /// Event name seen by the listener.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Log => "BlastedEventLog",
            Self::Loaded => "BlastedEventLoaded",
            Self::ClearedMemory => "BlastedEventClearedMemory",
            Self::ClearedDisk => "BlastedEventClearedDisk",
            Self::ClearedAll => "BlastedEventClearedAll",
        }
    }
}

/// A named notification with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlastedEvent {
    kind: EventKind,
    message: String,
}

impl BlastedEvent {
    /// Creates an event; the message gets the module tag prefix.
    #[must_use]
    pub fn new(kind: EventKind, body: impl AsRef<str>) -> Self {
        Self {
            kind,
            message: format!("[{MODULE_TAG}] {}", body.as_ref()),
        }
    }

    /// Diagnostic log event.
    #[must_use]
    pub fn log(body: impl AsRef<str>) -> Self {
        Self::new(EventKind::Log, body)
    }

    /// Load-completed event.
    #[must_use]
    pub fn loaded(body: impl AsRef<str>) -> Self {
        Self::new(EventKind::Loaded, body)
    }

    /// Memory-cleared event.
    #[must_use]
    pub fn cleared_memory() -> Self {
        Self::new(EventKind::ClearedMemory, "Memory cache cleared.")
    }

    /// Disk-cleared event.
    #[must_use]
    pub fn cleared_disk() -> Self {
        Self::new(EventKind::ClearedDisk, "Disk cache cleared.")
    }

    /// All-cleared event.
    #[must_use]
    pub fn cleared_all() -> Self {
        Self::new(EventKind::ClearedAll, "Memory and disk cache cleared.")
    }

    /// Channel this event is published on.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Event name seen by the listener.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Prefixed message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for BlastedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_prefixed_with_module_tag() {
        let event = BlastedEvent::loaded("(NETWORK) https://cdn.example.com/a.png");

        assert_eq!(event.name(), "BlastedEventLoaded");
        assert_eq!(
            event.message(),
            "[BlastedImage] (NETWORK) https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_clear_events() {
        assert_eq!(
            BlastedEvent::cleared_all().message(),
            "[BlastedImage] Memory and disk cache cleared."
        );
        assert_eq!(
            BlastedEvent::cleared_memory().kind(),
            EventKind::ClearedMemory
        );
        assert_eq!(BlastedEvent::cleared_disk().name(), "BlastedEventClearedDisk");
    }
}
