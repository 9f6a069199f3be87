//! Configuration management and validation.
//!
//! Provides the translation settings assembled from CLI arguments and the
//! character sets the translator can read and write.

use crate::constants::{DEFAULT_INPUT_CHARSET, DEFAULT_OUTPUT_CHARSET};
use crate::{Error, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character sets supported for survey input and Therion output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Charset {
    Utf8,
    Latin1,
    Windows1252,
}

/// Labels `encoding_rs` folds into windows-1252 that still name strict ISO-8859-1
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "csisolatin1",
    "cp819",
    "ibm819",
];

impl Charset {
    /// Canonical name, as written in the Therion `encoding` line
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Windows1252 => "windows-1252",
        }
    }

    /// Encoding used for the actual byte conversion
    ///
    /// ISO-8859-1 is read as windows-1252, its superset, as browsers do.
    pub fn encoding(self) -> &'static Encoding {
        match self {
            Charset::Utf8 => UTF_8,
            Charset::Latin1 | Charset::Windows1252 => WINDOWS_1252,
        }
    }

    /// Decode raw input bytes
    ///
    /// A byte order mark is not stripped. Malformed UTF-8 is an error; the
    /// single-byte charsets decode every byte.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        let (text, had_errors) = self.encoding().decode_without_bom_handling(bytes);
        if had_errors {
            return Err(Error::io(
                format!("Input is not valid {}", self.name()),
                std::io::Error::new(std::io::ErrorKind::InvalidData, "malformed byte sequence"),
            ));
        }
        Ok(text.into_owned())
    }

    /// Encode output text
    ///
    /// The first character the charset cannot hold is reported.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        if self == Charset::Latin1 {
            if let Some(c) = text.chars().find(|&c| u32::from(c) > 0xFF) {
                return Err(self.unencodable(c));
            }
        }

        let (bytes, _, had_unmappable) = self.encoding().encode(text);
        if had_unmappable {
            let mut buffer = [0u8; 4];
            let character = text
                .chars()
                .find(|c| self.encoding().encode(c.encode_utf8(&mut buffer)).2)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(self.unencodable(character));
        }
        Ok(bytes.into_owned())
    }

    fn unencodable(self, character: char) -> Error {
        Error::Unencodable {
            character,
            charset: self.name().to_string(),
        }
    }
}

impl FromStr for Charset {
    type Err = Error;

    /// Accepts any WHATWG label of the three supported encodings
    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        let encoding =
            Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::unsupported_charset(s))?;

        if encoding == UTF_8 {
            Ok(Charset::Utf8)
        } else if encoding == WINDOWS_1252 {
            let lowered = label.to_ascii_lowercase();
            if LATIN1_LABELS.contains(&lowered.as_str()) {
                Ok(Charset::Latin1)
            } else {
                Ok(Charset::Windows1252)
            }
        } else {
            Err(Error::unsupported_charset(s))
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for one translation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Cave name written as the file header comment
    pub cave_name: String,

    /// Charset of the Compass input
    /// Default: windows-1252 (Compass is a Windows program)
    pub input_charset: Charset,

    /// Charset of the Therion output
    /// Default: UTF-8
    pub output_charset: Charset,

    /// Replace survey and station names Therion cannot handle
    pub rename_identifiers: bool,

    /// Infer equate connections between surveys sharing station names
    pub link_surveys: bool,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            cave_name: String::new(),
            // constants are known-good names
            input_charset: DEFAULT_INPUT_CHARSET.parse().unwrap_or(Charset::Windows1252),
            output_charset: DEFAULT_OUTPUT_CHARSET.parse().unwrap_or(Charset::Utf8),
            rename_identifiers: false,
            link_surveys: true,
        }
    }
}

impl TranslateConfig {
    pub fn new(cave_name: impl Into<String>) -> Self {
        Self {
            cave_name: cave_name.into(),
            ..Self::default()
        }
    }

    /// Set the input charset
    pub fn with_input_charset(mut self, charset: Charset) -> Self {
        self.input_charset = charset;
        self
    }

    /// Set the output charset
    pub fn with_output_charset(mut self, charset: Charset) -> Self {
        self.output_charset = charset;
        self
    }

    /// Enable or disable identifier renaming
    pub fn with_renaming(mut self, enabled: bool) -> Self {
        self.rename_identifiers = enabled;
        self
    }

    /// Enable or disable connection inference
    pub fn with_linking(mut self, enabled: bool) -> Self {
        self.link_surveys = enabled;
        self
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.cave_name.trim().is_empty() {
            return Err(Error::configuration("Cave name must not be empty"));
        }

        if self.cave_name.contains(['\n', '\r']) {
            return Err(Error::configuration(
                "Cave name must be a single line of text",
            ));
        }

        Ok(())
    }
}
