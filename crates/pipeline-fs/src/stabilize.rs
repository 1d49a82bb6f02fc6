//! Size-stabilization polling for files that may still be written
//!
//! Downloads and copies in progress grow over time; ingesting them early
//! would hash a truncated file. [`stabilize_file`] waits until the size
//! stops changing.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Polling parameters for [`stabilize_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizeOptions {
    /// Delay between two size reads
    pub poll_interval: Duration,
    /// Consecutive unchanged reads required
    pub stable_polls: u32,
    /// Upper bound on total waiting time
    pub timeout: Duration,
}

impl Default for StabilizeOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            stable_polls: 3,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Result of a stabilization wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizeOutcome {
    /// Size was unchanged for the required number of polls
    Stable,
    /// Timeout elapsed while the size was still changing
    TimedOut,
}

impl StabilizeOutcome {
    pub fn is_stable(&self) -> bool {
        matches!(self, Self::Stable)
    }
}

/// Poll a file's size until it is unchanged across `stable_polls`
/// consecutive reads, or until `timeout` elapses.
///
/// A timeout is not an error: callers treat a file that keeps changing as
/// slow rather than stuck and proceed. A file that disappears while being
/// polled is an error.
pub fn stabilize_file(path: &Path, options: &StabilizeOptions) -> Result<StabilizeOutcome> {
    let start = Instant::now();
    let mut last_size: Option<u64> = None;
    let mut unchanged = 0u32;

    while start.elapsed() < options.timeout {
        let size = std::fs::metadata(path)
            .map_err(|e| Error::io(path, e))?
            .len();

        if last_size == Some(size) {
            unchanged += 1;
            if unchanged >= options.stable_polls {
                tracing::debug!(path = %path.display(), size, "file size stable");
                return Ok(StabilizeOutcome::Stable);
            }
        } else {
            unchanged = 0;
            last_size = Some(size);
        }

        thread::sleep(options.poll_interval);
    }

    Ok(StabilizeOutcome::TimedOut)
}
