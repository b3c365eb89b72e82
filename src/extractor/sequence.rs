use crate::error::Result;
use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

/// The next numeric suffix to hand out for an output filename.
///
/// Initialized once per run and shared across all input files; it never
/// decreases, and it advances only when a frame is actually written.
#[derive(Debug, Clone)]
pub struct SequenceCounter {
    next: u64,
}

impl SequenceCounter {
    pub fn new(start: u64) -> Self {
        Self { next: start }
    }

    pub fn current(&self) -> u64 {
        self.next
    }

    pub fn advance(&mut self) -> u64 {
        let allocated = self.next;
        self.next += 1;
        allocated
    }

    /// Initialize the counter from the output directory's file listing.
    ///
    /// If `<prefix>-1.jpg` exists, the sequence continues at one past the
    /// highest suffix found among `<prefix>-*.jpg` entries; otherwise it
    /// starts at 1. Filenames that match the naming shape but carry a
    /// non-numeric or out-of-range suffix are skipped and reported instead
    /// of aborting the bootstrap.
    pub fn bootstrap(output_dir: &Path, prefix: &str) -> Result<BootstrapOutcome> {
        let probe = output_dir.join(format!("{}-1.jpg", prefix));
        if !probe.exists() {
            return Ok(BootstrapOutcome {
                counter: SequenceCounter::new(1),
                resumed_from: None,
                malformed: Vec::new(),
            });
        }

        let suffix_pattern = Regex::new(&format!(r"^{}-([0-9]+)\.jpg$", regex::escape(prefix)))
            .expect("sequence suffix pattern is valid");

        let mut highest = 1u64;
        let mut malformed = Vec::new();

        for entry in WalkDir::new(output_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| crate::error::PicSplitError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().to_string();
            if !matches_naming_shape(&filename, prefix) {
                continue;
            }

            match suffix_pattern
                .captures(&filename)
                .and_then(|caps| caps[1].parse::<u64>().ok())
            {
                Some(number) => highest = highest.max(number),
                None => malformed.push(filename),
            }
        }

        Ok(BootstrapOutcome {
            counter: SequenceCounter::new(highest + 1),
            resumed_from: Some(highest),
            malformed,
        })
    }
}

/// Result of scanning the output directory for an existing sequence.
#[derive(Debug)]
pub struct BootstrapOutcome {
    pub counter: SequenceCounter,
    /// Highest existing suffix, when the sequence is being resumed.
    pub resumed_from: Option<u64>,
    /// Filenames matching `<prefix>-*.jpg` whose suffix did not parse.
    pub malformed: Vec<String>,
}

// Loose naming shape: anything between "<prefix>-" and ".jpg".
fn matches_naming_shape(filename: &str, prefix: &str) -> bool {
    filename
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|rest| rest.ends_with(".jpg"))
}
