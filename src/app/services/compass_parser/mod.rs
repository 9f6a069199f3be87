//! Compass parser for `.dat` cave survey files
//!
//! Compass stores one survey trip per section. Sections are closed by a form
//! feed line and the meaning of every header line is fixed by its position,
//! so parsing is a small state machine rather than a grammar.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Line loop, section handling and error line tagging
//! - [`state`] - Section cursor naming each header position
//! - [`header`] - Survey name, date, comment, team and declination extraction
//! - [`format_code`] - FORMAT code string decoding and unit coercion
//! - [`shot_parser`] - Individual shot record processing
//! - [`field_parsers`] - Utility functions for labelled fields and numbers
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use cave_translator::app::services::compass_parser::CompassParser;
//! use cave_translator::Charset;
//!
//! # fn example(bytes: &[u8]) -> cave_translator::Result<()> {
//! let result = CompassParser::new().parse("Fisher Ridge", bytes, Charset::Windows1252)?;
//!
//! println!("Parsed {} surveys with {} shots",
//!          result.cave.surveys().len(),
//!          result.cave.shot_count());
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod format_code;
pub mod header;
pub mod parser;
pub mod shot_parser;
pub mod state;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use format_code::decode_format;
pub use parser::CompassParser;
pub use state::SectionState;
pub use stats::{ParseResult, ParseStats};
