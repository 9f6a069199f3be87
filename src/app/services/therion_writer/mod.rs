//! Therion writer for translated cave surveys
//!
//! ## Architecture
//!
//! - [`writer`] - Document layout, number and date formatting
//! - [`renaming`] - Optional replacement of names Therion cannot handle
//!
//! ## Usage
//!
//! ```rust
//! use cave_translator::app::services::therion_writer::TherionWriter;
//! use cave_translator::Cave;
//!
//! # fn example(cave: &Cave) -> cave_translator::Result<()> {
//! let text = TherionWriter::new(true)?.serialize("UTF-8", cave)?;
//! assert!(text.starts_with("encoding UTF-8"));
//! # Ok(())
//! # }
//! ```

pub mod renaming;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use renaming::{rename_identifiers, RenameSummary};
pub use writer::{format_date, TherionWriter};

use crate::app::models::Cave;
use crate::Result;

/// Serialize a cave in one call
pub fn serialize(charset_label: &str, cave: &Cave, rename_identifiers: bool) -> Result<String> {
    TherionWriter::new(rename_identifiers)?.serialize(charset_label, cave)
}
