//! Cave Translator Library
//!
//! A Rust library for translating Compass `.dat` cave survey files into
//! Therion centreline files.
//!
//! This library provides tools for:
//! - Parsing the positional Compass survey format, including its FORMAT code
//!   string, unit variants and backsight sentinels
//! - Inferring `equate` connections between survey sections sharing stations
//! - Writing Therion centreline data with optional collision-safe renaming
//! - Fixed-point unit conversion with half-up rounding at two decimals

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod compass_parser;
        pub mod connection_resolver;
        pub mod therion_writer;
        pub mod unit_conversion;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Cave, Connection, Shot, Survey, SurveyDate};
pub use config::{Charset, TranslateConfig};

/// Result type alias for the cave translator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for survey translation operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Structural failure in the survey file, tagged with the physical line
    #[error("Error while reading line {line} of survey file: {source}")]
    Parse {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    /// FORMAT code string of an unsupported length
    #[error("Format string invalid: {format}")]
    InvalidFormatString { format: String },

    /// Unit or item code outside the known enumeration
    #[error("{code} is a not supported {category}")]
    UnsupportedCode { category: &'static str, code: char },

    /// Numeric token that is not a decimal number
    #[error("Invalid number '{token}' for {field}")]
    InvalidNumber {
        token: String,
        field: &'static str,
        #[source]
        source: rust_decimal::Error,
    },

    /// Survey date token that cannot be decoded
    #[error("Invalid survey date '{value}': {message}")]
    InvalidDate { value: String, message: String },

    /// Shot record without the mandatory columns
    #[error("Incomplete shot record: expected at least {expected} fields, found {found}")]
    IncompleteShot { expected: usize, found: usize },

    /// Value outside the range a unit conversion can represent
    #[error("Cannot convert {value} to {unit}")]
    Conversion { value: String, unit: &'static str },

    /// Output destination already exists
    #[error("Output file already exists: {path}")]
    OutputExists { path: String },

    /// Charset name not supported
    #[error("Unsupported charset: {name}")]
    UnsupportedCharset { name: String },

    /// Text cannot be represented in the requested charset
    #[error("Cannot encode '{character}' in charset {charset}")]
    Unencodable { character: char, charset: String },

    /// Identifier pattern failed to compile
    #[error("Invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Formatting the output text failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Attach the physical input line to a parse failure
    pub fn at_line(line: usize, source: Error) -> Self {
        match source {
            // keep the innermost line when a failure is wrapped twice
            already @ Self::Parse { .. } => already,
            other => Self::Parse {
                line,
                source: Box::new(other),
            },
        }
    }

    /// Create an invalid format string error
    pub fn invalid_format_string(format: impl Into<String>) -> Self {
        Self::InvalidFormatString {
            format: format.into(),
        }
    }

    /// Create an unsupported code error
    pub fn unsupported_code(category: &'static str, code: char) -> Self {
        Self::UnsupportedCode { category, code }
    }

    /// Create an invalid number error
    pub fn invalid_number(
        token: impl Into<String>,
        field: &'static str,
        source: rust_decimal::Error,
    ) -> Self {
        Self::InvalidNumber {
            token: token.into(),
            field,
            source,
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a unit conversion error
    pub fn conversion(value: impl ToString, unit: &'static str) -> Self {
        Self::Conversion {
            value: value.to_string(),
            unit,
        }
    }

    /// Create an output exists error
    pub fn output_exists(path: impl Into<String>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create an unsupported charset error
    pub fn unsupported_charset(name: impl Into<String>) -> Self {
        Self::UnsupportedCharset { name: name.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Line number of a parse failure, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<std::fmt::Error> for Error {
    fn from(error: std::fmt::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}
