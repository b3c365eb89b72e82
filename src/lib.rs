pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExtractionConfig, IoConfig};
pub use error::{PicSplitError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    BootstrapOutcome, ConfigSnapshot, ExtractionProgress, FrameWriter, InputOutcome, InputStatus,
    RunReport, SequenceCounter,
};
pub use scanner::{Frame, FrameScanner, FrameSource};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Main library interface for PicSplit functionality
pub struct PicSplit {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl PicSplit {
    /// Create a new PicSplit instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);
        let shutdown = GracefulShutdown::new()?;

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        })
    }

    /// Create a new PicSplit instance for testing (no signal handler conflicts)
    #[cfg(test)]
    pub fn new_for_test(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(false);
        let shutdown = GracefulShutdown::new_for_test();

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    /// Create PicSplit instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbose, cli_args.quiet)
    }

    /// Scan every input file and write marker-delimited frames to `output_dir`.
    ///
    /// The sequence counter is initialized once from the directory listing
    /// and shared across all inputs. A missing or failing input is recorded
    /// and the run continues; an unwritable output directory aborts the run.
    pub fn extract_frames(&self, inputs: &[PathBuf], output_dir: &Path) -> Result<RunReport> {
        let start_time = Instant::now();
        self.shutdown.check_shutdown()?;

        self.output_formatter.start_operation("Extracting JPEG frames");

        let output_dir = self.prepare_output_directory(output_dir)?;
        self.output_formatter
            .info(&format!("Writing files to: {}", output_dir.display()));

        // Step 1: Resume or start the output sequence
        let bootstrap = self.bootstrap_sequence(&output_dir)?;
        let mut counter = bootstrap.counter;
        let first_sequence = counter.current();

        // Step 2: Scan each input in order
        let writer = FrameWriter::new(&output_dir, &self.config.extraction.prefix)
            .with_every(self.config.extraction.every);

        let mut input_outcomes = Vec::new();
        let mut errors = Vec::new();

        for input in inputs {
            self.shutdown.check_shutdown()?;

            let (outcome, input_errors) = self.extract_one(&writer, input, &mut counter);
            errors.extend(input_errors);
            input_outcomes.push(outcome);
        }

        // Step 3: Assemble the run report
        let report = RunReport {
            generated_at: Utc::now(),
            output_directory: output_dir.display().to_string(),
            frames_written: input_outcomes.iter().map(|o| o.frames_written).sum(),
            frames_skipped: input_outcomes.iter().map(|o| o.frames_skipped).sum(),
            bytes_scanned: input_outcomes.iter().map(|o| o.size).sum(),
            inputs: input_outcomes,
            first_sequence,
            next_sequence: counter.current(),
            duration: start_time.elapsed(),
            errors,
            config_used: self.create_config_snapshot(),
        };

        self.output_formatter.print_run_summary(&report);

        Ok(report)
    }

    fn prepare_output_directory(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|_| PicSplitError::OutputDirectoryUnwritable {
            path: dir.display().to_string(),
        })?;
        Ok(dir.to_path_buf())
    }

    fn bootstrap_sequence(&self, output_dir: &Path) -> Result<BootstrapOutcome> {
        let spinner = self
            .progress_manager
            .create_spinner("Checking for existing output files");
        let bootstrap = SequenceCounter::bootstrap(output_dir, &self.config.extraction.prefix)?;
        spinner.finish_and_clear();

        for filename in &bootstrap.malformed {
            let error = PicSplitError::MalformedOutputFilename {
                filename: filename.clone(),
            };
            self.output_formatter.warning(&error.user_message());
        }

        if let Some(highest) = bootstrap.resumed_from {
            self.output_formatter.info(&format!(
                "Existing files found - starting at number {}",
                highest + 1
            ));
        }

        Ok(bootstrap)
    }

    /// Process a single input file; failures are reported, not propagated.
    fn extract_one(
        &self,
        writer: &FrameWriter,
        input: &Path,
        counter: &mut SequenceCounter,
    ) -> (InputOutcome, Vec<String>) {
        let path_display = input.display().to_string();

        if !input.is_file() {
            let error = PicSplitError::InputNotFound {
                path: path_display.clone(),
            };
            self.output_formatter.error(&error.user_message());
            let outcome = InputOutcome {
                path: path_display,
                size: 0,
                frames_written: 0,
                frames_skipped: 0,
                status: InputStatus::Missing,
            };
            return (outcome, vec![error.user_message()]);
        }

        self.output_formatter
            .info(&format!("Decompressing: {}", path_display));

        let source = match FrameSource::open(input, self.config.io.mmap_threshold) {
            Ok(source) => source,
            Err(e) => {
                let message = format!("Failed to open {}: {}", path_display, e);
                self.output_formatter.error(&message);
                let outcome = InputOutcome {
                    path: path_display,
                    size: 0,
                    frames_written: 0,
                    frames_skipped: 0,
                    status: InputStatus::Failed,
                };
                return (outcome, vec![message]);
            }
        };

        self.output_formatter.debug(&format!(
            "File size: {} ({})",
            source.len(),
            ui::output::format_bytes(source.len())
        ));

        let scan_progress = self
            .progress_manager
            .create_scan_progress(source.len(), "Scanning...");
        let progress_callback = {
            let pb = scan_progress.clone();
            move |progress: &ExtractionProgress| {
                ui::progress::update_scan_progress(&pb, progress);
            }
        };

        let progress = writer.extract(source.as_bytes(), counter, Some(&progress_callback));

        ui::progress::finish_progress_with_summary(
            &scan_progress,
            &progress.status_line(),
            progress.elapsed(),
        );

        for error in &progress.errors {
            self.output_formatter.error(error);
        }

        let status = if !progress.errors.is_empty() {
            InputStatus::Failed
        } else if progress.frames_written > 0 {
            InputStatus::Extracted
        } else {
            InputStatus::Empty
        };

        let outcome = InputOutcome {
            path: path_display,
            size: source.len(),
            frames_written: progress.frames_written,
            frames_skipped: progress.frames_skipped,
            status,
        };

        (outcome, progress.errors)
    }

    /// Create configuration snapshot for reporting
    fn create_config_snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            prefix: self.config.extraction.prefix.clone(),
            every: self.config.extraction.every,
            mmap_threshold: self.config.io.mmap_threshold,
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(PicSplitError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Get progress manager reference
    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &PicSplitError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
