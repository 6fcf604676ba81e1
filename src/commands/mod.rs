//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `gopin` command-line tool. Each subcommand is defined in its own file to
//! keep the logic separated and maintainable.
//!
//! Each command module contains an `Args` struct deriving `clap::Args` and
//! an `execute` function that orchestrates the command by calling into the
//! `gopin` library. Workspace resolution happens here, once, so that the
//! library entry points receive an explicit `Workspace` value and never
//! consult the environment themselves.

pub mod completions;
pub mod ls;
pub mod restore;
pub mod snapshot;
