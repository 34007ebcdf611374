//! LCP command-line driver
//!
//! Library half of the `lcp` binary: argument definitions, subscriber setup
//! and the subcommand handlers, kept here so they can be tested without
//! spawning a process.
//!
//! ```text
//! lcp apply|revert|sync --file <PATH> [--in-place | --output <PATH>]
//! lcp apply|revert|sync --store <DIR> --tenant <DOMAIN>...
//! lcp inspect --file <PATH> [--json]
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::build_cli;
pub use commands::{inspect_file, load_config, patch_file, run, sync_store, Sink};
pub use logging::LogFormat;
