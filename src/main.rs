use clap::Parser;
use picsplit::{
    Cli, OutputFormatter, OutputMode, PicSplit, PicSplitError, SequenceCounter, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    // Create PicSplit instance
    let picsplit = match PicSplit::from_cli(&cli) {
        Ok(picsplit) => picsplit,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    let output_dir = match cli.output_directory() {
        Ok(dir) => dir.clone(),
        Err(e) => {
            picsplit.handle_error(&e);
            return 1;
        }
    };

    // Handle dry run mode
    if cli.dry_run {
        return handle_dry_run(&cli, &picsplit);
    }

    // Execute main extraction workflow
    match picsplit.extract_frames(&cli.input, &output_dir) {
        Ok(report) => {
            // Display final report based on output format
            picsplit.output_formatter().print_run_report(&report);

            // Return appropriate exit code
            if report.has_errors() {
                2 // Some inputs failed, run completed
            } else {
                0 // Success
            }
        }
        Err(e) => {
            picsplit.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &PicSplitError) -> i32 {
    match error {
        PicSplitError::Cancelled => 130, // Interrupted (SIGINT)
        PicSplitError::OutputDirectoryUnwritable { .. } => 3,
        PicSplitError::Config { .. } => 4,
        PicSplitError::InvalidPath { .. } => 5,
        _ => 1, // General error
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "picsplit.toml".to_string());

    match PicSplit::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  picsplit -i <input.pic> -d <dir> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(cli: &Cli, picsplit: &PicSplit) -> i32 {
    let formatter = picsplit.output_formatter();

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    let config = picsplit.config();
    formatter.info("Configuration that would be used:");
    println!("  Prefix: {}", config.extraction.prefix);
    println!("  Every: {}", config.extraction.every);
    println!("  Memory-map threshold: {} bytes", config.io.mmap_threshold);

    let output_dir = match cli.output_directory() {
        Ok(dir) => dir,
        Err(e) => {
            formatter.error(&e.user_message());
            return 1;
        }
    };

    formatter.print_separator();
    formatter.info("Extraction plan:");
    println!("  Output directory: {}", output_dir.display());

    // The bootstrap only reads directory entries, so it is safe here.
    if output_dir.is_dir() {
        match SequenceCounter::bootstrap(output_dir, &config.extraction.prefix) {
            Ok(bootstrap) => {
                println!("  Starting at number: {}", bootstrap.counter.current())
            }
            Err(e) => formatter.warning(&e.user_message()),
        }
    } else {
        println!("  Starting at number: 1 (directory will be created)");
    }

    let mut missing = 0usize;
    for input in &cli.input {
        match std::fs::metadata(input) {
            Ok(metadata) => println!("  Input: {} ({} bytes)", input.display(), metadata.len()),
            Err(_) => {
                missing += 1;
                println!("  Input: {} (not found)", input.display());
            }
        }
    }

    formatter.print_separator();
    if missing > 0 {
        formatter.warning(&format!("{} input file(s) not found", missing));
    }
    formatter.success("Dry run completed");
    formatter.info("Run without --dry-run to perform actual extraction");

    0
}

fn print_startup_error(error: &PicSplitError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
