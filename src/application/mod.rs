//! Application layer: parsing use cases
//!
//! This layer drives the domain composition tree and reports uniform errors.

pub mod batch;
pub mod error;
pub mod parser;

pub use batch::{parse_batch, BatchEntry, BatchSummary};
pub use error::{ApplicationError, ApplicationResult, ParseError};
pub use parser::{parse, parse_tree, try_parse, RomanNumeral};
