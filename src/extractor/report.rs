use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Final accounting for one run, across all input files.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub output_directory: String,
    pub inputs: Vec<InputOutcome>,
    pub frames_written: usize,
    pub frames_skipped: usize,
    pub bytes_scanned: u64,
    /// First sequence number this run handed out.
    pub first_sequence: u64,
    /// Next free sequence number after the run.
    pub next_sequence: u64,
    pub duration: Duration,
    pub errors: Vec<String>,
    pub config_used: ConfigSnapshot,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputOutcome {
    pub path: String,
    pub size: u64,
    pub frames_written: usize,
    pub frames_skipped: usize,
    pub status: InputStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputStatus {
    /// At least one frame was written from this input.
    Extracted,
    /// Scanned cleanly, but no frame was written.
    Empty,
    /// The input path did not exist.
    Missing,
    /// An I/O failure aborted this input mid-scan.
    Failed,
}

impl InputStatus {
    pub fn describe(self) -> &'static str {
        match self {
            InputStatus::Extracted => "extracted",
            InputStatus::Empty => "no frames written",
            InputStatus::Missing => "not found",
            InputStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    pub prefix: String,
    pub every: u64,
    pub mmap_threshold: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> RunReport {
        RunReport {
            generated_at: Utc::now(),
            output_directory: "/tmp/out".to_string(),
            inputs: vec![InputOutcome {
                path: "a.pic".to_string(),
                size: 128,
                frames_written: 3,
                frames_skipped: 1,
                status: InputStatus::Extracted,
            }],
            frames_written: 3,
            frames_skipped: 1,
            bytes_scanned: 128,
            first_sequence: 1,
            next_sequence: 4,
            duration: Duration::from_millis(12),
            errors: Vec::new(),
            config_used: ConfigSnapshot {
                prefix: "Picture".to_string(),
                every: 2,
                mmap_threshold: 64 * 1024 * 1024,
            },
        }
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"frames_written\":3"));
        assert!(json.contains("\"status\":\"extracted\""));
        assert!(json.contains("\"prefix\":\"Picture\""));
    }

    #[test]
    fn test_has_errors() {
        let mut report = sample_report();
        assert!(!report.has_errors());
        report.errors.push("boom".to_string());
        assert!(report.has_errors());
    }

    #[test]
    fn test_status_descriptions() {
        assert_eq!(InputStatus::Empty.describe(), "no frames written");
        assert_eq!(InputStatus::Missing.describe(), "not found");
    }
}
