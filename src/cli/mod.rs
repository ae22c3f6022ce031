//! Command-line interface for exploring the search strategies.
//! This module is not part of the public library API.

pub mod args;
pub mod commands;

pub use args::SearchCli;
