//! The `symres` command-line tool: loads a symbol-table dump and prints
//! resolved local declarations or the effective members of a class.

pub mod args;
pub mod commands;
pub mod reporter;
pub mod tracing_config;
