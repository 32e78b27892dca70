//! Strict Roman numeral parsing.
//!
//! Numerals are consumed left to right into an arena-backed composition tree
//! whose left children are subtracted and right children added. Malformed
//! numerals (`IIII` by default, `VV`, `IM`, `IXX`, ...) are rejected with
//! [`ParseError::InvalidFormat`].
//!
//! ```
//! use romanum::{parse, try_parse, ParseOptions};
//!
//! assert_eq!(parse("MCMXCIX", ParseOptions::default()), Ok(1999));
//! assert_eq!(try_parse("IM", ParseOptions::default()), (false, 0));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use application::{parse, parse_tree, try_parse, ParseError, RomanNumeral};
pub use domain::{FormatError, MaxRepetitions, Numeral, ParseOptions};
