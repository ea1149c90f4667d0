//! Arbor text helpers
//!
//! Small, stateless string routines used when printing reports about trees
//! and containers:
//!
//! - [`wrap`]: greedy word wrapping that honors existing line breaks
//! - [`pad_around`]: make sure delimiter characters have a pad on each side
//! - [`banner`]: grow a title to a fixed width with a border character
//! - [`tokenize_with_positions`]: split on delimiters, keeping character offsets
//!
//! All widths and positions count Unicode scalar values, not bytes.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod pad;
pub mod token;
pub mod wrap;

pub use pad::{banner, pad_around, DEFAULT_WHITESPACE};
pub use token::{tokenize_with_positions, Token};
pub use wrap::{wrap, DEFAULT_WIDTH};
