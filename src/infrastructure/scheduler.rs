//! Thread-backed primary and background execution contexts.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tokio::sync::mpsc;
use tracing::{error, trace, warn};

use crate::domain::ports::{SchedulerPort, Work};

/// Name of the primary context thread.
pub const PRIMARY_THREAD_NAME: &str = "blasted-primary";

/// Runs primary work on one long-lived FIFO thread and spawns a fresh thread
/// for every background job.
///
/// Work that panics or is never run drops its completion handle; callers
/// observe that as an interrupted operation.
pub struct ThreadScheduler {
    primary_tx: mpsc::UnboundedSender<Work>,
    background_seq: AtomicUsize,
}

impl ThreadScheduler {
    /// Starts the primary context thread.
    ///
    /// # Errors
    /// Returns error if the thread cannot be spawned.
    pub fn new() -> std::io::Result<Self> {
        let (primary_tx, mut primary_rx) = mpsc::unbounded_channel::<Work>();

        thread::Builder::new()
            .name(PRIMARY_THREAD_NAME.to_string())
            .spawn(move || {
                while let Some(work) = primary_rx.blocking_recv() {
                    run_guarded(work);
                }
                trace!("Primary context stopped");
            })?;

        Ok(Self {
            primary_tx,
            background_seq: AtomicUsize::new(0),
        })
    }
}

impl SchedulerPort for ThreadScheduler {
    fn run_on_primary(&self, work: Work) {
        if self.primary_tx.send(work).is_err() {
            warn!("Primary context is gone, dropping work");
        }
    }

    fn run_on_background(&self, work: Work) {
        let seq = self.background_seq.fetch_add(1, Ordering::Relaxed);
        let spawned = thread::Builder::new()
            .name(format!("blasted-bg-{seq}"))
            .spawn(move || run_guarded(work));

        if let Err(e) = spawned {
            warn!(error = %e, "Failed to spawn background context, dropping work");
        }
    }
}

fn run_guarded(work: Work) {
    if panic::catch_unwind(AssertUnwindSafe(work)).is_err() {
        error!(
            thread = thread::current().name().unwrap_or("unnamed"),
            "Scheduled work panicked"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    fn thread_name() -> String {
        thread::current().name().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_primary_work_runs_in_fifo_order() {
        let scheduler = ThreadScheduler::new().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = oneshot::channel();

        for i in 0..3 {
            let seen = Arc::clone(&seen);
            scheduler.run_on_primary(Box::new(move || {
                seen.lock().unwrap().push((i, thread_name()));
            }));
        }
        scheduler.run_on_primary(Box::new(move || {
            let _ = tx.send(());
        }));
        rx.await.unwrap();

        let seen = seen.lock().unwrap().clone();
        assert_eq!(
            seen.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(seen.iter().all(|(_, name)| name == PRIMARY_THREAD_NAME));
    }

    #[tokio::test]
    async fn test_background_work_gets_fresh_thread() {
        let scheduler = ThreadScheduler::new().unwrap();
        let (tx, rx) = oneshot::channel();

        scheduler.run_on_background(Box::new(move || {
            let _ = tx.send(thread_name());
        }));

        let name = rx.await.unwrap();
        assert!(name.starts_with("blasted-bg-"));
    }

    #[tokio::test]
    async fn test_panicking_work_drops_completion_and_keeps_primary_alive() {
        let scheduler = ThreadScheduler::new().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        scheduler.run_on_primary(Box::new(move || {
            let _keep = tx;
            panic!("boom");
        }));
        assert!(rx.await.is_err());

        let (tx, rx) = oneshot::channel();
        scheduler.run_on_primary(Box::new(move || {
            let _ = tx.send(());
        }));
        assert!(rx.await.is_ok());
    }
}
