/*
 * Responsibility
 * - Runtime operating level (boot / install / upgrade / run ...)
 * - RuntimeState: read-only view consumed by routing
 * - RuntimeStatus: shared, lock-free handle the host flips as it boots
 */
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RuntimeLevel {
    Unknown = 0,
    Boot = 1,
    Install = 2,
    Upgrade = 3,
    Run = 4,
    BootFailed = 5,
}

impl RuntimeLevel {
    pub fn is_running(self) -> bool {
        matches!(self, Self::Run)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Boot => "boot",
            Self::Install => "install",
            Self::Upgrade => "upgrade",
            Self::Run => "run",
            Self::BootFailed => "boot_failed",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Boot,
            2 => Self::Install,
            3 => Self::Upgrade,
            4 => Self::Run,
            5 => Self::BootFailed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for RuntimeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait RuntimeState: Send + Sync {
    fn level(&self) -> RuntimeLevel;
}

/// Cheap to clone; all clones observe the same level.
#[derive(Clone, Debug)]
pub struct RuntimeStatus {
    level: Arc<AtomicU8>,
}

impl RuntimeStatus {
    pub fn new(level: RuntimeLevel) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(level as u8)),
        }
    }

    pub fn set_level(&self, level: RuntimeLevel) {
        let previous = RuntimeLevel::from_u8(self.level.swap(level as u8, Ordering::AcqRel));
        if previous != level {
            tracing::info!(from = %previous, to = %level, "runtime level changed");
        }
    }
}

impl Default for RuntimeStatus {
    fn default() -> Self {
        Self::new(RuntimeLevel::Unknown)
    }
}

impl RuntimeState for RuntimeStatus {
    fn level(&self) -> RuntimeLevel {
        RuntimeLevel::from_u8(self.level.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_level() {
        let status = RuntimeStatus::new(RuntimeLevel::Boot);
        let observer = status.clone();

        status.set_level(RuntimeLevel::Run);

        assert_eq!(observer.level(), RuntimeLevel::Run);
    }

    #[test]
    fn every_level_survives_the_atomic_slot() {
        let status = RuntimeStatus::default();
        for level in [
            RuntimeLevel::Boot,
            RuntimeLevel::Install,
            RuntimeLevel::Upgrade,
            RuntimeLevel::Run,
            RuntimeLevel::BootFailed,
            RuntimeLevel::Unknown,
        ] {
            status.set_level(level);
            assert_eq!(status.level(), level);
        }
    }
}
