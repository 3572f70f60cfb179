//! Process liveness reporting for `GET /health`.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sysinfo::System;
use tracing::debug;

/// Memory held by the current process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    /// Resident set size.
    pub rss: u64,
    /// Virtual memory size.
    #[serde(rename = "virtual")]
    pub virtual_memory: u64,
}

/// Snapshot returned by the health endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    /// Seconds since the reporter was created.
    pub uptime: f64,
    pub timestamp: DateTime<Utc>,
    pub memory_usage: MemoryUsage,
}

/// Reports liveness, uptime and memory. Independent of the user store.
#[derive(Debug)]
pub struct HealthReporter {
    started: Instant,
}

impl HealthReporter {
    /// Start the uptime clock now.
    #[must_use]
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }

    /// Take a snapshot. Never fails; memory reads as zero where the
    /// platform cannot report it.
    #[must_use]
    pub fn report(&self) -> HealthReport {
        HealthReport {
            status: "ok",
            uptime: self.started.elapsed().as_secs_f64(),
            timestamp: Utc::now(),
            memory_usage: sample_memory(),
        }
    }
}

impl Default for HealthReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_memory() -> MemoryUsage {
    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(e) => {
            debug!(error = e, "current pid unavailable");
            return MemoryUsage::default();
        }
    };
    let mut sys = System::new();
    if !sys.refresh_process(pid) {
        debug!(pid = %pid, "process stats unavailable");
        return MemoryUsage::default();
    }
    sys.process(pid).map_or_else(MemoryUsage::default, |process| MemoryUsage {
        rss: process.memory(),
        virtual_memory: process.virtual_memory(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_has_ok_status_and_non_negative_uptime() {
        let reporter = HealthReporter::new();
        let report = reporter.report();
        assert_eq!(report.status, "ok");
        assert!(report.uptime >= 0.0, "uptime must not be negative");
    }

    #[test]
    fn uptime_grows_between_reports() {
        let reporter = HealthReporter::new();
        let first = reporter.report();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = reporter.report();
        assert!(second.uptime > first.uptime, "uptime must increase");
        assert!(second.timestamp >= first.timestamp);
    }

    #[test]
    fn report_serializes_with_camel_case_fields() {
        let value = match serde_json::to_value(HealthReporter::new().report()) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        for field in ["status", "uptime", "timestamp", "memoryUsage"] {
            assert!(value.get(field).is_some(), "missing {field} field");
        }
        assert!(value["memoryUsage"].get("rss").is_some(), "missing rss field");
        assert!(value["memoryUsage"].get("virtual").is_some(), "missing virtual field");
    }
}
