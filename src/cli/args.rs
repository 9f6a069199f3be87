//! Command-line argument definitions for the cave translator
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{Charset, TranslateConfig};
use crate::constants::{DEFAULT_INPUT_CHARSET, DEFAULT_OUTPUT_CHARSET, OUTPUT_EXTENSION};
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// Output path that selects standard output
pub const STDOUT_PATH: &str = "-";

/// CLI arguments for the Compass to Therion translator
///
/// Reads one Compass `.dat` survey file and writes one Therion `.th`
/// centreline file.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cave-translate",
    version,
    about = "Translate Compass .dat cave surveys into Therion centreline files",
    long_about = "Reads a Compass .dat survey file, infers equates between survey sections \
                  that share station names and writes a Therion .th file. Unit codes Therion \
                  cannot express are converted, and names Therion cannot parse can be renamed."
)]
pub struct Args {
    /// Compass survey file to translate
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Therion file to write
    ///
    /// Defaults to the input path with a `.th` extension. Use `-` for
    /// standard output. An existing file is never overwritten.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUTPUT",
        help = "Therion file to write ('-' for stdout)"
    )]
    pub output: Option<PathBuf>,

    /// Cave name written at the top of the Therion file
    ///
    /// Defaults to the file name of the input without extension.
    #[arg(
        short = 'n',
        long = "cave-name",
        value_name = "NAME",
        help = "Cave name written at the top of the output"
    )]
    pub cave_name: Option<String>,

    /// Rename surveys and stations whose names Therion cannot parse
    #[arg(
        short = 'r',
        long = "rename",
        help = "Replace non-alphanumeric survey and station names with numbers"
    )]
    pub rename: bool,

    /// Charset of the Compass file
    #[arg(
        long = "input-charset",
        value_name = "CHARSET",
        default_value = DEFAULT_INPUT_CHARSET,
        help = "Charset of the input file (UTF-8, ISO-8859-1, windows-1252)"
    )]
    pub input_charset: Charset,

    /// Charset of the Therion file
    #[arg(
        long = "output-charset",
        value_name = "CHARSET",
        default_value = DEFAULT_OUTPUT_CHARSET,
        help = "Charset of the output file (UTF-8, ISO-8859-1, windows-1252)"
    )]
    pub output_charset: Charset,

    /// Do not infer equates between surveys sharing station names
    #[arg(long = "no-equates", help = "Do not infer equates between surveys")]
    pub no_equates: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Where the Therion text goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl Args {
    /// Cave name from the flag, falling back to the input file stem
    pub fn cave_name(&self) -> Result<String> {
        if let Some(name) = &self.cave_name {
            return Ok(name.clone());
        }

        self.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::configuration(format!(
                    "Cannot derive a cave name from {}, use --cave-name",
                    self.input.display()
                ))
            })
    }

    /// Resolve the output destination
    pub fn output_target(&self) -> OutputTarget {
        match &self.output {
            Some(path) if path.as_os_str() == STDOUT_PATH => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path.clone()),
            None => OutputTarget::File(self.input.with_extension(OUTPUT_EXTENSION)),
        }
    }

    /// Build the translation settings
    pub fn to_config(&self) -> Result<TranslateConfig> {
        let config = TranslateConfig::new(self.cave_name()?)
            .with_input_charset(self.input_charset)
            .with_output_charset(self.output_charset)
            .with_renaming(self.rename)
            .with_linking(!self.no_equates);

        config.validate()?;
        Ok(config)
    }

    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }

        if let OutputTarget::File(path) = self.output_target() {
            if path == self.input {
                return Err(Error::configuration(
                    "Output path must differ from the input path",
                ));
            }
        }

        Ok(())
    }

    /// Get logging level based on verbosity
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
