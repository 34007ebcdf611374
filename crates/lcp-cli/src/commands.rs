//! Subcommand handlers

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use lcp_document::{LifecycleDocument, LocatedExecution};
use lcp_patcher::{LifecycleConfigPatcher, PatchMode, PatchOutcome, PatcherConfig};
use lcp_tenant::{FsConfigStore, FsTenantDirectory, SyncError, SyncStatus, TenantLifecycleSync};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Where a patched file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// Print to stdout
    Stdout,
    /// Overwrite the input
    InPlace,
    /// Write to this path
    Path(PathBuf),
}

/// Load configuration from `path`, or defaults
///
/// # Errors
/// If the file cannot be read or is invalid
pub fn load_config(path: Option<&Path>) -> Result<PatcherConfig> {
    match path {
        Some(path) => PatcherConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(PatcherConfig::default()),
    }
}

/// Patch one file
///
/// # Errors
/// On read, patch or write failure; nothing is written unless patching succeeded
pub fn patch_file(
    patcher: &LifecycleConfigPatcher,
    mode: PatchMode,
    input: &Path,
    sink: &Sink,
) -> Result<PatchOutcome> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let outcome = patcher
        .patch(mode, &text)
        .with_context(|| format!("failed to {mode} {}", input.display()))?;

    let target = match sink {
        Sink::Stdout => None,
        Sink::InPlace => Some(input),
        Sink::Path(path) => Some(path.as_path()),
    };
    if let Some(target) = target {
        std::fs::write(target, &outcome.document)
            .with_context(|| format!("failed to write {}", target.display()))?;
        tracing::info!(
            path = %target.display(),
            changed = outcome.changed(),
            "wrote lifecycle file"
        );
    }
    Ok(outcome)
}

/// Run `mode` for each tenant of a filesystem store
pub fn sync_store(
    config: &PatcherConfig,
    mode: PatchMode,
    root: &Path,
    tenants: &[String],
) -> Vec<(String, Result<SyncStatus, SyncError>)> {
    let sync = TenantLifecycleSync::with_config(
        FsTenantDirectory::new(root),
        FsConfigStore::new(root),
        config,
    );
    sync.run_all(tenants, mode)
}

#[derive(Debug, Serialize)]
struct Inspection {
    hash: String,
    states: Vec<String>,
    executions: Vec<LocatedExecution>,
}

/// Describe the execution entries of a lifecycle file
///
/// # Errors
/// If the file cannot be read or parsed
pub fn inspect_file(path: &Path, json: bool) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = LifecycleDocument::parse(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let inspection = Inspection {
        hash: doc.content_hash()?.to_string(),
        states: doc.state_ids(),
        executions: doc.executions(),
    };

    if json {
        return serde_json::to_string_pretty(&inspection).context("failed to encode JSON");
    }

    let mut out = String::new();
    writeln!(out, "hash: {}", inspection.hash)?;
    writeln!(out, "states: {}", inspection.states.join(", "))?;
    for located in &inspection.executions {
        writeln!(
            out,
            "{:<16} {}",
            located.state.as_deref().unwrap_or("-"),
            located.entry
        )?;
    }
    Ok(out)
}

/// Dispatch parsed arguments; `Ok(false)` means some tenant failed
///
/// # Errors
/// On configuration, file or argument errors
pub fn run(matches: &ArgMatches) -> Result<bool> {
    let config = load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("inspect", args)) => {
            let Some(path) = args.get_one::<PathBuf>("file") else {
                bail!("--file is required");
            };
            print!("{}", inspect_file(path, args.get_flag("json"))?);
            Ok(true)
        }
        Some((name, args)) => {
            let mode: PatchMode = name.parse().map_err(anyhow::Error::msg)?;
            run_patch(&config, mode, args)
        }
        None => bail!("no subcommand given"),
    }
}

fn run_patch(config: &PatcherConfig, mode: PatchMode, args: &ArgMatches) -> Result<bool> {
    if let Some(input) = args.get_one::<PathBuf>("file") {
        let sink = if args.get_flag("in-place") {
            Sink::InPlace
        } else if let Some(output) = args.get_one::<PathBuf>("output") {
            Sink::Path(output.clone())
        } else {
            Sink::Stdout
        };
        let patcher = LifecycleConfigPatcher::from_config(config);
        let outcome = patch_file(&patcher, mode, input, &sink)?;
        if sink == Sink::Stdout {
            println!("{}", outcome.document);
        }
        return Ok(true);
    }

    let Some(root) = args.get_one::<PathBuf>("store") else {
        bail!("either --file or --store is required");
    };
    let tenants: Vec<String> = args
        .get_many::<String>("tenant")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let mut ok = true;
    for (tenant, result) in sync_store(config, mode, root, &tenants) {
        match result {
            Ok(SyncStatus::Updated(outcome)) => {
                let state = if outcome.changed() { "updated" } else { "unchanged" };
                println!("{tenant}: {state} ({})", outcome.after.short());
            }
            Ok(SyncStatus::Skipped) => println!("{tenant}: skipped (unknown tenant)"),
            Err(err) => {
                ok = false;
                eprintln!("{tenant}: {:#}", anyhow::Error::new(err));
            }
        }
    }
    Ok(ok)
}
