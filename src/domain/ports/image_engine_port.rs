//! Port for the underlying fetch/decode/cache engine.

use async_trait::async_trait;

use crate::domain::entities::{EngineSource, FetchDescriptor};
use crate::domain::errors::CacheResult;

/// Engine that owns the memory and disk tiers.
/// Implementations must be thread-safe.
#[async_trait]
pub trait ImageEnginePort: Send + Sync {
    /// Fetches and caches the descriptor's target without handing back a
    /// displayable resource. Returns where the result came from.
    async fn preload(&self, descriptor: &FetchDescriptor) -> CacheResult<EngineSource>;

    /// Clears the memory tier. Must run on the primary context.
    fn clear_memory(&self) -> CacheResult<()>;

    /// Clears the disk tier. Blocking I/O; must run on a background context.
    fn clear_disk(&self) -> CacheResult<()>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::errors::CacheError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Engine returning scripted results and counting calls.
    pub struct ScriptedEngine {
        preload_result: Mutex<CacheResult<EngineSource>>,
        memory_result: Mutex<CacheResult<()>>,
        disk_result: Mutex<CacheResult<()>>,
        preloads: Mutex<Vec<FetchDescriptor>>,
        memory_clears: AtomicUsize,
        disk_clears: AtomicUsize,
    }

    impl ScriptedEngine {
        /// Creates an engine where every call succeeds from the network.
        pub fn new() -> Self {
            Self {
                preload_result: Mutex::new(Ok(EngineSource::Remote)),
                memory_result: Mutex::new(Ok(())),
                disk_result: Mutex::new(Ok(())),
                preloads: Mutex::new(Vec::new()),
                memory_clears: AtomicUsize::new(0),
                disk_clears: AtomicUsize::new(0),
            }
        }

        /// Engine whose preloads report `source`.
        pub fn reporting(source: EngineSource) -> Self {
            let engine = Self::new();
            *engine.preload_result.lock().unwrap() = Ok(source);
            engine
        }

        pub fn fail_preload(&self, error: CacheError) {
            *self.preload_result.lock().unwrap() = Err(error);
        }

        pub fn fail_memory_clear(&self, error: CacheError) {
            *self.memory_result.lock().unwrap() = Err(error);
        }

        pub fn fail_disk_clear(&self, error: CacheError) {
            *self.disk_result.lock().unwrap() = Err(error);
        }

        pub fn preloads(&self) -> Vec<FetchDescriptor> {
            self.preloads.lock().unwrap().clone()
        }

        pub fn memory_clears(&self) -> usize {
            self.memory_clears.load(Ordering::SeqCst)
        }

        pub fn disk_clears(&self) -> usize {
            self.disk_clears.load(Ordering::SeqCst)
        }
    }

    impl Default for ScriptedEngine {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ImageEnginePort for ScriptedEngine {
        async fn preload(&self, descriptor: &FetchDescriptor) -> CacheResult<EngineSource> {
            self.preloads.lock().unwrap().push(descriptor.clone());
            self.preload_result.lock().unwrap().clone()
        }

        fn clear_memory(&self) -> CacheResult<()> {
            self.memory_clears.fetch_add(1, Ordering::SeqCst);
            self.memory_result.lock().unwrap().clone()
        }

        fn clear_disk(&self) -> CacheResult<()> {
            self.disk_clears.fetch_add(1, Ordering::SeqCst);
            self.disk_result.lock().unwrap().clone()
        }
    }
}
