//! Domain layer: numerals and the composition tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod numeral;

pub use arena::{CompositionNode, CompositionTree, TreeIterator};
pub use error::{DomainResult, FormatError};
pub use numeral::{MaxRepetitions, Numeral, ParseOptions};
