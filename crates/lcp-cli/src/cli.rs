//! Argument definitions

use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};
use std::path::PathBuf;

/// Subcommands that run the patcher
pub const PATCH_COMMANDS: [&str; 3] = ["apply", "revert", "sync"];

fn patch_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Lifecycle XML file to patch"),
        )
        .arg(
            Arg::new("in-place")
                .long("in-place")
                .action(ArgAction::SetTrue)
                .requires("file")
                .help("Overwrite the input file"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .requires("file")
                .conflicts_with("in-place")
                .help("Write the result here instead of stdout"),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .requires("tenant")
                .help("Tenant store root (<DIR>/<tenant>/<resource>.xml)"),
        )
        .arg(
            Arg::new("tenant")
                .long("tenant")
                .short('t')
                .value_name("DOMAIN")
                .action(ArgAction::Append)
                .requires("store")
                .help("Tenant domain to update; repeatable"),
        )
        .group(
            ArgGroup::new("source")
                .args(["file", "store"])
                .required(true),
        )
}

/// Build the `lcp` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("lcp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Install or remove the custom API executor in lifecycle configurations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Patcher configuration (TOML)"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(["text", "json"])
                .help("Log output format"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log level (-v debug, -vv trace)"),
        )
        .subcommand(patch_command(
            "apply",
            "Point Publish/Re-Publish at the custom executor",
        ))
        .subcommand(patch_command(
            "revert",
            "Restore the default executor",
        ))
        .subcommand(patch_command(
            "sync",
            "Revert, then apply; safe to repeat",
        ))
        .subcommand(
            Command::new("inspect")
                .about("List execution entries of a lifecycle file")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .required(true)
                        .value_name("PATH")
                        .value_parser(value_parser!(PathBuf))
                        .help("Lifecycle XML file"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}
