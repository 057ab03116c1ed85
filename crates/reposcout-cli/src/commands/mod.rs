// Module exports for CLI subcommands.
//
// Each module handles a specific subcommand; main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod repos;
