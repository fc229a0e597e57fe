//! Phase timing and memory checkpoints
//!
//! - Memory: Reads RSS (Resident Set Size) from /proc/self/status
//! - Timing: Uses std::time::Instant for precise measurements

use std::fs;
use std::time::{Duration, Instant};
use tracing::debug;

/// Get current RSS (Resident Set Size) in bytes from /proc/self/status
///
/// Returns None where /proc is unavailable.
pub fn get_rss_bytes() -> Option<u64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss(&status)
}

/// Extract VmRSS from the contents of /proc/self/status
fn parse_vm_rss(status: &str) -> Option<u64> {
    // Format: "VmRSS:    123456 kB"
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kb = line.split_whitespace().nth(1)?.parse::<u64>().ok()?;
    Some(kb * 1024)
}

/// Get current RSS in megabytes
pub fn get_rss_mb() -> Option<f64> {
    get_rss_bytes().map(|bytes| bytes as f64 / (1024.0 * 1024.0))
}

/// Tracks elapsed time across the phases of one run
#[derive(Debug)]
pub struct PhaseTimer {
    start: Instant,
    last: Instant,
}

impl PhaseTimer {
    pub fn start() -> Self {
        let now = Instant::now();
        PhaseTimer {
            start: now,
            last: now,
        }
    }

    /// Log the time since the previous phase ended, returning it
    pub fn phase(&mut self, label: &str) -> Duration {
        let now = Instant::now();
        let delta = now - self.last;
        self.last = now;

        match get_rss_mb() {
            Some(rss) => debug!(
                "[{:.3}s +{:.3}s] {} (RSS {:.2} MB)",
                self.elapsed().as_secs_f64(),
                delta.as_secs_f64(),
                label,
                rss
            ),
            None => debug!(
                "[{:.3}s +{:.3}s] {}",
                self.elapsed().as_secs_f64(),
                delta.as_secs_f64(),
                label
            ),
        }

        delta
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
