//! Command implementations for the cave translator CLI
//!
//! This module runs the translation pipeline (parse, resolve, serialize,
//! encode) and handles the file system, logging and summary reporting
//! around it.

use crate::app::services::compass_parser::{CompassParser, ParseStats};
use crate::app::services::connection_resolver::{
    ConnectionResolver, DisconnectedResolver, FlatNamespaceResolver,
};
use crate::app::services::therion_writer::{RenameSummary, TherionWriter};
use crate::cli::args::{Args, OutputTarget};
use crate::config::TranslateConfig;
use crate::{Error, Result};
use colored::*;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Translation statistics for reporting
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TranslationStats {
    /// Statistics collected while parsing
    pub parse: ParseStats,
    /// Number of surveys written
    pub surveys: usize,
    /// Number of shots written
    pub shots: usize,
    /// Number of equates written
    pub connections: usize,
    /// Identifiers replaced before writing
    pub renamed: RenameSummary,
    /// Size of the encoded output
    pub bytes_written: usize,
    /// Total processing time
    pub processing_time: Duration,
}

/// Encoded Therion document and its statistics
#[derive(Debug, Clone)]
pub struct Translation {
    pub output: Vec<u8>,
    pub stats: TranslationStats,
}

/// Main command runner
///
/// 1. Set up logging and validate arguments
/// 2. Refuse an existing output file before reading any input
/// 3. Translate the input
/// 4. Write the output and print a summary
pub fn run(args: Args) -> Result<TranslationStats> {
    let start_time = Instant::now();

    setup_logging(&args)?;

    info!("Starting cave translator");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.to_config()?;
    debug!("Translation configuration: {:?}", config);

    let target = args.output_target();
    if let OutputTarget::File(path) = &target {
        ensure_absent(path)?;
    }

    let input = std::fs::read(&args.input).map_err(|e| {
        Error::io(format!("Failed to read {}", args.input.display()), e)
    })?;

    let mut translation = translate(&config, &input)?;
    write_output(&target, &translation.output)?;

    translation.stats.processing_time = start_time.elapsed();

    if !args.quiet {
        generate_report(&target, &translation.stats);
    }

    Ok(translation.stats)
}

/// Translate Compass bytes into encoded Therion bytes
pub fn translate(config: &TranslateConfig, input: &[u8]) -> Result<Translation> {
    let result = CompassParser::new().parse(&config.cave_name, input, config.input_charset)?;
    let mut cave = result.cave;

    let resolver: Box<dyn ConnectionResolver> = if config.link_surveys {
        Box::new(FlatNamespaceResolver)
    } else {
        Box::new(DisconnectedResolver)
    };
    resolver.resolve(&mut cave);

    let writer = TherionWriter::new(config.rename_identifiers)?;
    let (text, renamed) = writer.serialize_with_summary(config.output_charset.name(), &cave)?;
    let output = config.output_charset.encode(&text)?;

    let stats = TranslationStats {
        parse: result.stats,
        surveys: cave.surveys().len(),
        shots: cave.shot_count(),
        connections: cave.connections().len(),
        renamed,
        bytes_written: output.len(),
        processing_time: Duration::default(),
    };

    Ok(Translation { output, stats })
}

/// Fail if the output file already exists
pub fn ensure_absent(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::output_exists(path.display().to_string()));
    }
    Ok(())
}

/// Write the encoded document, never replacing an existing file
fn write_output(target: &OutputTarget, output: &[u8]) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output)?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => {
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .map_err(|e| match e.kind() {
                    ErrorKind::AlreadyExists => Error::output_exists(path.display().to_string()),
                    _ => Error::io(format!("Failed to create {}", path.display()), e),
                })?;
            file.write_all(output)
                .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
            info!("Wrote {} bytes to {}", output.len(), path.display());
        }
    }
    Ok(())
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cave_translator={}", log_level)));

    let initialized = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if initialized.is_err() {
        debug!("Logging already initialized");
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Print a colored summary to stderr, keeping stdout for the document
fn generate_report(target: &OutputTarget, stats: &TranslationStats) {
    eprintln!("\n{}", "Translation Summary".bright_green().bold());
    eprintln!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time.as_millis().to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Surveys:".bright_cyan(),
        stats.surveys.to_string().bright_white().bold()
    );
    eprintln!(
        "  {} {}",
        "Shots:".bright_cyan(),
        stats.shots.to_string().bright_white().bold()
    );
    eprintln!(
        "  {} {}",
        "Equates:".bright_cyan(),
        stats.connections.to_string().bright_white()
    );

    let advisories = stats.parse.advisories();
    if advisories > 0 {
        eprintln!(
            "  {} {} ({} units, {} backsights, {} dimensions)",
            "Advisories:".bright_yellow(),
            advisories.to_string().bright_yellow().bold(),
            stats.parse.coerced_units,
            stats.parse.flipped_readings,
            stats.parse.zeroed_dimensions
        );
    }
    let skipped = stats.parse.duplicate_shots + stats.parse.duplicate_surveys;
    if skipped > 0 {
        eprintln!(
            "  {} {}",
            "Duplicates skipped:".bright_yellow(),
            skipped.to_string().bright_yellow()
        );
    }
    if stats.renamed.surveys + stats.renamed.stations > 0 {
        eprintln!(
            "  {} {} surveys, {} stations",
            "Renamed:".bright_cyan(),
            stats.renamed.surveys.to_string().bright_white(),
            stats.renamed.stations.to_string().bright_white()
        );
    }
    if let OutputTarget::File(path) = target {
        eprintln!(
            "  {} {} ({} bytes)",
            "Output:".bright_cyan(),
            path.display().to_string().bright_white(),
            stats.bytes_written
        );
    }
}
