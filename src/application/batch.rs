//! Batch parsing of numeral lists
//!
//! Each line is parsed independently on the rayon pool; results keep input order.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::application::error::ParseError;
use crate::application::parser::parse;
use crate::domain::ParseOptions;

/// Outcome for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// 1-based line number in the input
    pub line: usize,
    /// Trimmed input text
    pub input: String,
    pub result: Result<u32, ParseError>,
}

impl BatchEntry {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

/// Counts of valid and invalid entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub valid: usize,
    pub invalid: usize,
}

impl BatchSummary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let valid = entries.iter().filter(|e| e.is_valid()).count();
        Self {
            valid,
            invalid: entries.len() - valid,
        }
    }

    pub fn total(&self) -> usize {
        self.valid + self.invalid
    }
}

/// Parses every numeral line of `lines`.
///
/// Lines are trimmed; blank lines and `#` comments are skipped.
#[instrument(level = "debug", skip(lines))]
pub fn parse_batch<I, S>(lines: I, options: ParseOptions) -> Vec<BatchEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pending: Vec<(usize, String)> = lines
        .into_iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.as_ref().trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some((i + 1, trimmed.to_string()))
            }
        })
        .collect();
    debug!("parse_batch: {} numerals", pending.len());

    pending
        .into_par_iter()
        .map(|(line, input)| {
            let result = parse(&input, options);
            BatchEntry {
                line,
                input,
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_mixed_lines_when_parsing_batch_then_keeps_order_and_line_numbers() {
        let input = "XIV\n\n# comment\n  mcmxcix  \nIIX\n";
        let entries = parse_batch(input.lines(), ParseOptions::default());

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].line, 1);
        assert_eq!(entries[0].result, Ok(14));
        assert_eq!(entries[1].line, 4);
        assert_eq!(entries[1].input, "mcmxcix");
        assert_eq!(entries[1].result, Ok(1999));
        assert_eq!(entries[2].line, 5);
        assert!(!entries[2].is_valid());

        let summary = BatchSummary::from_entries(&entries);
        assert_eq!(summary, BatchSummary { valid: 2, invalid: 1 });
        assert_eq!(summary.total(), 3);
    }
}
