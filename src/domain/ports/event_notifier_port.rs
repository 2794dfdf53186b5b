use crate::domain::event::BlastedEvent;

/// Port for outbound notifications.
///
/// Delivery is best-effort; a lost event never affects an operation's result.
pub trait EventNotifierPort: Send + Sync {
    /// Publishes an event to whatever listener is subscribed.
    fn emit(&self, event: &BlastedEvent);
}

#[cfg(test)]
#[allow(dead_code)]
pub mod mock {
    use super::*;
    use crate::domain::event::EventKind;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub events: Arc<Mutex<Vec<BlastedEvent>>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<BlastedEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn kinds(&self) -> Vec<EventKind> {
            self.events().iter().map(BlastedEvent::kind).collect()
        }

        pub fn messages(&self, kind: EventKind) -> Vec<String> {
            self.events()
                .into_iter()
                .filter(|e| e.kind() == kind)
                .map(|e| e.message().to_string())
                .collect()
        }
    }

    impl EventNotifierPort for RecordingNotifier {
        fn emit(&self, event: &BlastedEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }
}
