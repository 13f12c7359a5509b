// src/types.rs

//! Small value types shared by the execution engine, the reporters and the
//! global run slot.

use std::fmt;
use std::process::ExitStatus;

/// Raw value reported for a command that never started.
///
/// Real wait statuses are always non-negative, so this can't collide.
pub const SPAWN_FAILED: i32 = -1;

/// Which of the two captured child streams a chunk (or an error) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamTag {
    Stdout,
    Stderr,
}

impl StreamTag {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamTag::Stdout => "stdout",
            StreamTag::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Termination status of a run.
///
/// `Spawned` carries the raw wait status exactly as the platform reported it:
///
/// - normal exit: low 7 bits are zero, `(raw >> 8) & 0xff` is the exit code;
/// - killed by a signal: low 7 bits hold the signal number, bit 7 is the
///   core-dump flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunStatus {
    /// The process could not be started at all.
    #[default]
    NotSpawned,
    /// The process started and was reaped with this raw wait status.
    Spawned(i32),
}

impl RunStatus {
    /// Build a status from what `wait()` returned.
    pub fn from_exit_status(status: ExitStatus) -> Self {
        RunStatus::Spawned(raw_wait_status(status))
    }

    /// Status a process would have after `exit(code)`.
    pub fn exited(code: u8) -> Self {
        RunStatus::Spawned(encode_exit_code(code))
    }

    /// Raw integer form, with [`SPAWN_FAILED`] for `NotSpawned`.
    pub fn raw(self) -> i32 {
        match self {
            RunStatus::NotSpawned => SPAWN_FAILED,
            RunStatus::Spawned(raw) => raw,
        }
    }

    pub fn is_spawned(self) -> bool {
        matches!(self, RunStatus::Spawned(_))
    }

    /// Exit code, if the process exited normally.
    pub fn exit_code(self) -> Option<u8> {
        match self {
            RunStatus::Spawned(raw) if raw & 0x7f == 0 => Some(((raw >> 8) & 0xff) as u8),
            _ => None,
        }
    }

    /// Terminating signal, if the process was killed by one.
    pub fn signal(self) -> Option<i32> {
        match self {
            // 0x7f in the low bits means "stopped", which `wait` without
            // WUNTRACED never reports; treat it as not-a-signal anyway.
            RunStatus::Spawned(raw) if raw & 0x7f != 0 && raw & 0x7f != 0x7f => Some(raw & 0x7f),
            _ => None,
        }
    }

    pub fn core_dumped(self) -> bool {
        self.signal().is_some() && self.raw() & 0x80 != 0
    }

    /// `true` only for a normal exit with code 0.
    pub fn success(self) -> bool {
        self.exit_code() == Some(0)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.exit_code() {
            return write!(f, "exited with code {code}");
        }
        if let Some(sig) = self.signal() {
            return if self.core_dumped() {
                write!(f, "killed by signal {sig} (core dumped)")
            } else {
                write!(f, "killed by signal {sig}")
            };
        }
        match self {
            RunStatus::NotSpawned => f.write_str("not spawned"),
            RunStatus::Spawned(raw) => write!(f, "raw status {raw}"),
        }
    }
}

/// Encode an exit code the way the platform's wait primitive does.
pub fn encode_exit_code(code: u8) -> i32 {
    i32::from(code) << 8
}

#[cfg(unix)]
fn raw_wait_status(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.into_raw()
}

#[cfg(not(unix))]
fn raw_wait_status(status: ExitStatus) -> i32 {
    // No signals here; fold the exit code into the same layout.
    status.code().map(|c| (c & 0xff) << 8).unwrap_or(0xff << 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_exit_decodes_code() {
        let status = RunStatus::Spawned(3 << 8);
        assert_eq!(status.exit_code(), Some(3));
        assert_eq!(status.signal(), None);
        assert!(!status.success());
        assert_eq!(status.to_string(), "exited with code 3");
    }

    #[test]
    fn zero_is_success() {
        assert!(RunStatus::Spawned(0).success());
        assert!(RunStatus::exited(0).success());
    }

    #[test]
    fn signal_decodes_number_and_core_flag() {
        let killed = RunStatus::Spawned(15);
        assert_eq!(killed.signal(), Some(15));
        assert_eq!(killed.exit_code(), None);
        assert!(!killed.core_dumped());

        let dumped = RunStatus::Spawned(0x80 | 11);
        assert_eq!(dumped.signal(), Some(11));
        assert!(dumped.core_dumped());
        assert_eq!(dumped.to_string(), "killed by signal 11 (core dumped)");
    }

    #[test]
    fn not_spawned_uses_sentinel() {
        let status = RunStatus::NotSpawned;
        assert_eq!(status.raw(), SPAWN_FAILED);
        assert_eq!(status.exit_code(), None);
        assert_eq!(status.signal(), None);
        assert!(!status.is_spawned());
        assert_eq!(status.to_string(), "not spawned");
    }

    #[test]
    fn encoding_matches_decoding() {
        assert_eq!(encode_exit_code(2), 512);
        assert_eq!(encode_exit_code(255), 0xff00);
        assert_eq!(RunStatus::exited(2).raw(), 512);
        assert_eq!(RunStatus::exited(255).exit_code(), Some(255));
    }

    #[cfg(unix)]
    #[test]
    fn from_exit_status_keeps_raw_value() {
        use std::os::unix::process::ExitStatusExt;

        let status = RunStatus::from_exit_status(ExitStatus::from_raw(7 << 8));
        assert_eq!(status, RunStatus::Spawned(7 << 8));
        assert_eq!(status.exit_code(), Some(7));
    }

    #[test]
    fn stream_tag_display() {
        assert_eq!(StreamTag::Stdout.to_string(), "stdout");
        assert_eq!(StreamTag::Stderr.to_string(), "stderr");
    }
}
