//! # sora-cli — Command-Line Interface for the SORA Stack
//!
//! Subcommand handlers for running risk calculations offline and
//! dumping the static reference tables. All input and output is JSON;
//! calculations read a request document from a file or stdin and print
//! the engine result to stdout.

pub mod calc;
pub mod reference;
