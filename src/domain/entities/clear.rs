//! Result of a cache-clear invocation.

use crate::domain::errors::{CacheError, CacheResult, ImageError};

/// Tier set targeted by a clear operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    /// Memory tier only.
    Memory,
    /// Disk tier only.
    Disk,
    /// Memory, then disk.
    All,
}

/// Per-tier results of one clear operation.
///
/// A stage that was never attempted is `None`. `All` is not atomic: a memory
/// success followed by a disk failure is reported as partial.
#[derive(Debug, Clone)]
pub struct ClearOutcome {
    target: ClearTarget,
    memory: Option<CacheResult<()>>,
    disk: Option<CacheResult<()>>,
}

impl ClearOutcome {
    /// Outcome of a memory-only clear.
    #[must_use]
    pub fn memory(result: CacheResult<()>) -> Self {
        Self {
            target: ClearTarget::Memory,
            memory: Some(result),
            disk: None,
        }
    }

    /// Outcome of a disk-only clear.
    #[must_use]
    pub fn disk(result: CacheResult<()>) -> Self {
        Self {
            target: ClearTarget::Disk,
            memory: None,
            disk: Some(result),
        }
    }

    /// Outcome of a combined clear; `disk` is `None` when it was skipped.
    #[must_use]
    pub fn all(memory: CacheResult<()>, disk: Option<CacheResult<()>>) -> Self {
        Self {
            target: ClearTarget::All,
            memory: Some(memory),
            disk,
        }
    }

    /// Targeted tiers.
    #[must_use]
    pub const fn target(&self) -> ClearTarget {
        self.target
    }

    /// Memory stage result, if attempted.
    #[must_use]
    pub const fn memory_result(&self) -> Option<&CacheResult<()>> {
        self.memory.as_ref()
    }

    /// Disk stage result, if attempted.
    #[must_use]
    pub const fn disk_result(&self) -> Option<&CacheResult<()>> {
        self.disk.as_ref()
    }

    /// True when every targeted stage ran and succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        let memory_ok = match self.target {
            ClearTarget::Disk => true,
            _ => matches!(self.memory, Some(Ok(()))),
        };
        let disk_ok = match self.target {
            ClearTarget::Memory => true,
            _ => matches!(self.disk, Some(Ok(()))),
        };
        memory_ok && disk_ok
    }

    /// True when memory was cleared but the disk stage failed.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(
            (&self.memory, &self.disk),
            (Some(Ok(())), Some(Err(_)))
        )
    }

    /// Collapses the outcome into the first failing stage's error.
    ///
    /// # Errors
    /// Returns `ClearMemory` or `ClearDisk` for the stage that failed.
    pub fn into_result(self) -> Result<(), ImageError> {
        if let Some(Err(cause)) = self.memory {
            return Err(ImageError::ClearMemory { cause });
        }
        match (self.target, self.disk) {
            (_, Some(Err(cause))) => Err(ImageError::ClearDisk { cause }),
            (ClearTarget::Memory, _) | (_, Some(Ok(()))) => Ok(()),
            (_, None) => Err(ImageError::ClearDisk {
                cause: CacheError::interrupted("disk stage was never run"),
            }),
        }
    }
}
