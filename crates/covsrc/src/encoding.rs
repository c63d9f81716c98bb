//! Declared source encodings.
//!
//! Only ASCII-compatible encodings are supported, so line terminators are the same
//! bytes before and after decoding. Decoding is lossy: malformed input becomes
//! U+FFFD rather than failing the load.

use crate::result::{SourceError, SourceResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Text encoding used to decode source lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SourceEncoding {
    /// UTF-8
    #[default]
    Utf8,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
    /// US-ASCII, bytes above 0x7F decode to U+FFFD
    Ascii,
}

impl SourceEncoding {
    /// Canonical name of the encoding
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
            Self::Ascii => "US-ASCII",
        }
    }

    /// Decode raw bytes into text
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes),
            Self::Latin1 => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Ascii => {
                if bytes.is_ascii() {
                    // ASCII is valid UTF-8
                    String::from_utf8_lossy(bytes)
                } else {
                    Cow::Owned(
                        bytes
                            .iter()
                            .map(|&b| {
                                if b.is_ascii() {
                                    char::from(b)
                                } else {
                                    char::REPLACEMENT_CHARACTER
                                }
                            })
                            .collect(),
                    )
                }
            }
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceEncoding {
    type Err = SourceError;

    fn from_str(s: &str) -> SourceResult<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('_', "-");
        match normalized.as_str() {
            "UTF-8" | "UTF8" => Ok(Self::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" => Ok(Self::Latin1),
            "US-ASCII" | "ASCII" => Ok(Self::Ascii),
            "" => Err(SourceError::config("source encoding is empty")),
            _ => Err(SourceError::config(format!(
                "unsupported source encoding '{}'",
                s.trim()
            ))),
        }
    }
}
