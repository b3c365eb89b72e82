use crate::config::{CliOverrides, Config};
use crate::error::{PicSplitError, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "picsplit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract JPEG frames from Hikvision PIC surveillance recordings")]
#[command(
    long_about = "PicSplit scans proprietary CCTV recording containers for embedded JPEG \
                  start/end markers and writes every delimited frame to its own sequentially \
                  numbered file. Existing output files with the same prefix continue the \
                  numbering across runs."
)]
#[command(after_help = "EXAMPLES:\n  \
    picsplit -i recording.pic -d frames\n  \
    picsplit -i cam1.pic cam2.pic -d frames --prefix Lobby\n  \
    picsplit -i recording.pic -d frames --every 25 --output-format json\n  \
    picsplit -i recording.pic -d frames --config picsplit.toml")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PIC files to scan
    #[arg(
        short,
        long = "input",
        value_name = "FILES",
        num_args = 1..,
        required_unless_present = "generate_config"
    )]
    pub input: Vec<PathBuf>,

    /// Output directory for extracted frames (created if missing)
    #[arg(
        short = 'd',
        long = "directory",
        value_name = "DIR",
        required_unless_present = "generate_config"
    )]
    pub directory: Option<PathBuf>,

    /// Output filename prefix; frames are named <PREFIX>-<n>.jpg
    #[arg(short, long, value_parser = validate_prefix)]
    pub prefix: Option<String>,

    /// Write only every Nth frame
    #[arg(
        short,
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Write only every Nth frame (default: 1, every frame)"
    )]
    pub every: Option<u64>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show what would be extracted without writing files")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_prefix(self.prefix.clone())
            .with_every(self.every)
    }

    pub fn output_directory(&self) -> Result<&PathBuf> {
        self.directory.as_ref().ok_or_else(|| PicSplitError::Config {
            message: "An output directory is required (-d/--directory)".to_string(),
        })
    }

    pub fn should_use_colors(&self) -> bool {
        !self.quiet && console::Term::stdout().features().colors_supported()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn validate_prefix(s: &str) -> std::result::Result<String, String> {
    if s.is_empty() {
        return Err("Prefix must not be empty".to_string());
    }

    if s.len() > 100 {
        return Err("Prefix must be 100 characters or less".to_string());
    }

    // The prefix is spliced into filenames and the resume glob; path
    // separators and wildcards would change what either one means.
    if s.chars()
        .any(|c| matches!(c, '/' | '\\' | '*' | '?' | '<' | '>' | ':' | '"' | '|') || c.is_control())
    {
        return Err(format!("Prefix contains invalid characters: {}", s));
    }

    if s.starts_with('.') {
        return Err("Prefix cannot start with a dot".to_string());
    }

    Ok(s.to_string())
}
