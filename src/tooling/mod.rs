//! CLI Tooling
//!
//! Command-line interface for all toolsmith operations. The CLI parses
//! arguments, delegates to command services, and formats output.

pub mod cli;
