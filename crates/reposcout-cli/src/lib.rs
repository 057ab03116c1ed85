//! reposcout CLI library.
//!
//! This crate provides the command-line surface for repository search,
//! including flag parsing, terminal styling, result rendering, and the
//! browser/pager collaborators.

pub mod browser;
pub mod commands;
pub mod output;
pub mod pager;
pub mod terminal;
