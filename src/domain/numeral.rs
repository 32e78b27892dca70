//! Roman numeral symbols and parse options

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::FormatError;

/// A single Roman numeral letter.
///
/// Variants are declared in ascending weight order so the derived `Ord`
/// compares numerals by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Numeral {
    I,
    V,
    X,
    L,
    C,
    D,
    M,
}

impl Numeral {
    /// All numerals in ascending order.
    pub const ALL: [Numeral; 7] = [
        Numeral::I,
        Numeral::V,
        Numeral::X,
        Numeral::L,
        Numeral::C,
        Numeral::D,
        Numeral::M,
    ];

    /// Decimal weight of the numeral.
    pub const fn weight(self) -> u32 {
        match self {
            Numeral::I => 1,
            Numeral::V => 5,
            Numeral::X => 10,
            Numeral::L => 50,
            Numeral::C => 100,
            Numeral::D => 500,
            Numeral::M => 1000,
        }
    }

    /// Upper-case letter of the numeral.
    pub const fn letter(self) -> char {
        match self {
            Numeral::I => 'I',
            Numeral::V => 'V',
            Numeral::X => 'X',
            Numeral::L => 'L',
            Numeral::C => 'C',
            Numeral::D => 'D',
            Numeral::M => 'M',
        }
    }

    /// V, L and D (the 5·10^k numerals) may not repeat.
    pub const fn is_repeatable(self) -> bool {
        !matches!(self, Numeral::V | Numeral::L | Numeral::D)
    }

    /// V, L and D may not be subtracted from a higher numeral.
    pub const fn is_subtractable(self) -> bool {
        !matches!(self, Numeral::V | Numeral::L | Numeral::D)
    }
}

impl TryFrom<char> for Numeral {
    type Error = FormatError;

    /// Case-insensitive letter lookup.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'I' => Ok(Numeral::I),
            'V' => Ok(Numeral::V),
            'X' => Ok(Numeral::X),
            'L' => Ok(Numeral::L),
            'C' => Ok(Numeral::C),
            'D' => Ok(Numeral::D),
            'M' => Ok(Numeral::M),
            _ => Err(FormatError::UnrecognizedCharacter(c)),
        }
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Maximum number of consecutive identical numerals.
///
/// Serialized as the plain integer `3` or `4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MaxRepetitions {
    /// `III` is the longest run (default).
    #[default]
    Three,
    /// Allows the additive `IIII` form seen on clock faces.
    Four,
}

impl MaxRepetitions {
    pub const fn limit(self) -> u32 {
        match self {
            MaxRepetitions::Three => 3,
            MaxRepetitions::Four => 4,
        }
    }
}

impl TryFrom<u8> for MaxRepetitions {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(MaxRepetitions::Three),
            4 => Ok(MaxRepetitions::Four),
            other => Err(format!("max_repetitions must be 3 or 4, got {other}")),
        }
    }
}

impl From<MaxRepetitions> for u8 {
    fn from(value: MaxRepetitions) -> Self {
        match value {
            MaxRepetitions::Three => 3,
            MaxRepetitions::Four => 4,
        }
    }
}

impl fmt::Display for MaxRepetitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.limit())
    }
}

/// Options accepted by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_repetitions: MaxRepetitions,
}

impl ParseOptions {
    pub fn new(max_repetitions: MaxRepetitions) -> Self {
        Self { max_repetitions }
    }
}
