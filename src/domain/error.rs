//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::numeral::Numeral;

/// Grammar violations detected while building a composition tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unrecognized character {0:?}")]
    UnrecognizedCharacter(char),

    #[error("numeral {numeral} repeated more than {limit} times")]
    TooManyRepetitions { numeral: Numeral, limit: u32 },

    #[error("numeral {0} cannot be repeated")]
    NotRepeatable(Numeral),

    #[error("numeral {0} cannot be subtracted")]
    NotSubtractable(Numeral),

    #[error("{subtrahend} cannot be subtracted from {minuend} (more than ten times its value)")]
    RatioExceeded { subtrahend: Numeral, minuend: Numeral },

    #[error("numeral {0} repeated after a subtraction")]
    RepeatAfterSubtraction(Numeral),

    #[error("numeral {0} follows the same subtracted numeral")]
    DuplicateSubtraction(Numeral),

    #[error("repeated numeral {0} cannot be subtracted")]
    MultipliedSubtraction(Numeral),

    #[error("second numeral subtracted from {0}")]
    DoubleSubtraction(Numeral),

    #[error("subtraction would repeat numeral {0}")]
    ForbiddenRepetition(Numeral),

    #[error("value exceeds {}", u32::MAX)]
    ValueOutOfRange,

    #[error("node already has a right child")]
    RightChildOccupied,

    #[error("cannot rotate a node without a parent")]
    MissingParent,

    #[error("node index no longer refers to a tree node")]
    DanglingNode,
}

/// Result type for composition tree operations.
pub type DomainResult<T> = Result<T, FormatError>;
