//! Port for the two execution contexts cache work is dispatched on.

/// A unit of work handed to a context.
pub type Work = Box<dyn FnOnce() + Send + 'static>;

/// Dispatches work onto the primary (UI-affine) context or a background one.
pub trait SchedulerPort: Send + Sync {
    /// Queues `work` on the single FIFO primary context.
    fn run_on_primary(&self, work: Work);

    /// Runs `work` on a fresh background unit of work.
    fn run_on_background(&self, work: Work);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Execution context a piece of work was dispatched on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Context {
        Primary,
        Background,
    }

    /// Runs work immediately on the calling thread, recording the context.
    #[derive(Default)]
    pub struct InlineScheduler {
        dispatched: Mutex<Vec<Context>>,
        drop_background: bool,
    }

    impl InlineScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        /// Scheduler that discards background work without running it.
        pub fn dropping_background() -> Self {
            Self {
                dispatched: Mutex::new(Vec::new()),
                drop_background: true,
            }
        }

        pub fn dispatched(&self) -> Vec<Context> {
            self.dispatched.lock().unwrap().clone()
        }
    }

    impl SchedulerPort for InlineScheduler {
        fn run_on_primary(&self, work: Work) {
            self.dispatched.lock().unwrap().push(Context::Primary);
            work();
        }

        fn run_on_background(&self, work: Work) {
            self.dispatched.lock().unwrap().push(Context::Background);
            if !self.drop_background {
                work();
            }
        }
    }
}
