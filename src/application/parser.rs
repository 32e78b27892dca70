//! Roman numeral parser
//!
//! Drives a [`CompositionTree`] with one numeral per input character.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::application::error::ParseError;
use crate::domain::{CompositionTree, FormatError, Numeral, ParseOptions};

/// Builds the composition tree for `text`.
///
/// Characters are matched case-insensitively. Any character that is not a
/// numeral letter, and any grammar violation, fails with
/// [`ParseError::InvalidFormat`] naming the offending position.
#[instrument(level = "trace")]
pub fn parse_tree(text: &str, options: ParseOptions) -> Result<CompositionTree, ParseError> {
    let mut tree = CompositionTree::new();
    let mut current = tree.root();

    for (position, c) in text.chars().enumerate() {
        current = Numeral::try_from(c)
            .and_then(|numeral| tree.append(current, numeral, options.max_repetitions))
            .map_err(|reason| invalid_format(text, position, reason))?;
    }

    Ok(tree)
}

/// Parses a Roman numeral into its decimal value. The empty string is 0.
#[instrument(level = "debug")]
pub fn parse(text: &str, options: ParseOptions) -> Result<u32, ParseError> {
    let value = parse_tree(text, options)?.value();
    let value = u32::try_from(value)
        .map_err(|_| invalid_format(text, text.chars().count(), FormatError::ValueOutOfRange))?;
    debug!(value, "parsed");
    Ok(value)
}

/// Like [`parse`], but never fails: returns `(false, 0)` for invalid input.
pub fn try_parse(text: &str, options: ParseOptions) -> (bool, u32) {
    match parse(text, options) {
        Ok(value) => (true, value),
        Err(e) => {
            debug!("try_parse: {}", e);
            (false, 0)
        }
    }
}

fn invalid_format(text: &str, position: usize, reason: FormatError) -> ParseError {
    ParseError::InvalidFormat {
        input: text.to_string(),
        position,
        reason,
    }
}

/// A successfully parsed Roman numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RomanNumeral(u32);

impl RomanNumeral {
    /// Parses with default options (at most three repetitions).
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: ParseOptions) -> Result<Self, ParseError> {
        parse(text, options).map(Self)
    }

    /// Returns `None` instead of an error for invalid input.
    pub fn try_parse(text: &str) -> Option<Self> {
        Self::parse(text).ok()
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for RomanNumeral {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<RomanNumeral> for u32 {
    fn from(value: RomanNumeral) -> Self {
        value.0
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
