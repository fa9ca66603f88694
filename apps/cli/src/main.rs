//! ManifestLock CLI — scan Steam libraries and toggle per-app update locks.
//!
//! Presentation concerns (search filtering, output formatting) live here;
//! the scanning/mutation logic is all in `manifestlock-steam`.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use manifestlock_steam::{GameEntry, is_valid_root, resolve_default_root, scan_all, set_read_only};

#[derive(Parser)]
#[command(name = "manifestlock", version, about)]
struct Cli {
    /// Steam root directory (defaults to the detected installation).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved Steam root and whether it is usable.
    Root,
    /// List installed apps across all library folders.
    Scan {
        /// Only show entries whose name or app id contains this text.
        #[arg(long)]
        search: Option<String>,
        /// Emit the entry list as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Lock updates for the selected apps (manifest becomes read-only).
    Lock {
        /// App ids or manifest paths.
        #[arg(required = true)]
        apps: Vec<String>,
        /// Skip the one-time .bak snapshot.
        #[arg(long)]
        no_backup: bool,
    },
    /// Unlock updates for the selected apps.
    Unlock {
        #[arg(required = true)]
        apps: Vec<String>,
        #[arg(long)]
        no_backup: bool,
    },
    /// Flip the lock state of the selected apps.
    Toggle {
        #[arg(required = true)]
        apps: Vec<String>,
        #[arg(long)]
        no_backup: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Root => cmd_root(cli.root),
        Command::Scan { search, json } => cmd_scan(cli.root, search, json),
        Command::Lock { apps, no_backup } => cmd_set(cli.root, &apps, Some(true), no_backup),
        Command::Unlock { apps, no_backup } => cmd_set(cli.root, &apps, Some(false), no_backup),
        Command::Toggle { apps, no_backup } => cmd_set(cli.root, &apps, None, no_backup),
    }
}

fn cmd_root(explicit: Option<PathBuf>) -> anyhow::Result<()> {
    let root = match explicit.or_else(resolve_default_root) {
        Some(r) => r,
        None => bail!("no Steam installation found; pass one with --root"),
    };
    let state = if is_valid_root(&root) { "valid" } else { "invalid" };
    println!("{}  ({state})", root.display());
    Ok(())
}

/// Validates the explicit root, or falls back to platform detection.
fn resolve_steam_root(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(root) = explicit {
        if !is_valid_root(&root) {
            bail!(
                "{} does not look like a Steam root (needs a config/ directory and a libraryfolders.vdf)",
                root.display()
            );
        }
        return Ok(root);
    }

    let root =
        resolve_default_root().context("no Steam installation found; pass one with --root")?;
    if !is_valid_root(&root) {
        bail!(
            "detected Steam directory {} is missing config/ or libraryfolders.vdf",
            root.display()
        );
    }
    Ok(root)
}

fn cmd_scan(root: Option<PathBuf>, search: Option<String>, json: bool) -> anyhow::Result<()> {
    let root = resolve_steam_root(root)?;
    let mut games = scan_all(&root)?;

    if let Some(q) = search {
        let q = q.to_lowercase();
        games.retain(|g| g.name.to_lowercase().contains(&q) || g.app_id.to_lowercase().contains(&q));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&json_rows(&games)?)?);
        return Ok(());
    }

    for g in &games {
        let lock = if g.is_read_only() { "locked" } else { "      " };
        println!(
            "{lock}  {:>8}  {:<40}  [{}]",
            if g.app_id.is_empty() { "-" } else { g.app_id.as_str() },
            g.name,
            g.library
        );
    }
    eprintln!("{} game(s) under {}", games.len(), root.display());
    Ok(())
}

/// Applies a lock state (`None` = flip per entry) to each selected app,
/// reporting per-entry failures without aborting the rest of the batch.
fn cmd_set(
    root: Option<PathBuf>,
    apps: &[String],
    read_only: Option<bool>,
    no_backup: bool,
) -> anyhow::Result<()> {
    let root = resolve_steam_root(root)?;
    let games = scan_all(&root)?;

    let mut failures = 0usize;
    for selector in apps {
        let Some(game) = find_entry(&games, selector) else {
            eprintln!("no installed app matches '{selector}'");
            failures += 1;
            continue;
        };

        let target = read_only.unwrap_or(!game.is_read_only());
        match set_read_only(&game.manifest_path, target, !no_backup) {
            Ok(()) => {
                let state = if target { "locked" } else { "unlocked" };
                println!("{state}  {} ({})", game.name, game.manifest_path.display());
            }
            Err(e) => {
                eprintln!("failed for {}: {e}", game.name);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} toggle(s) failed", apps.len());
    }
    Ok(())
}

/// Serializes entries with the live lock state attached, so JSON
/// consumers see the same `readOnly` column the table shows.
fn json_rows(games: &[GameEntry]) -> anyhow::Result<Vec<serde_json::Value>> {
    games
        .iter()
        .map(|g| {
            let mut row = serde_json::to_value(g)?;
            row["readOnly"] = serde_json::Value::Bool(g.is_read_only());
            Ok(row)
        })
        .collect()
}

/// Matches a selector against app id, exact manifest path, or name.
fn find_entry<'a>(games: &'a [GameEntry], selector: &str) -> Option<&'a GameEntry> {
    games
        .iter()
        .find(|g| !g.app_id.is_empty() && g.app_id == selector)
        .or_else(|| {
            games
                .iter()
                .find(|g| g.manifest_path == PathBuf::from(selector))
        })
        .or_else(|| {
            games
                .iter()
                .find(|g| g.name.eq_ignore_ascii_case(selector))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn json_rows_carry_live_lock_state() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("appmanifest_10.acf");
        fs::write(&manifest, "\"appid\" \"10\"").unwrap();

        let games = vec![GameEntry {
            name: "Alpha".into(),
            app_id: "10".into(),
            manifest_path: manifest.clone(),
            library: "steamapps".into(),
        }];

        let rows = json_rows(&games).unwrap();
        assert_eq!(rows[0]["readOnly"], serde_json::Value::Bool(false));
        assert_eq!(rows[0]["appId"], "10");

        set_read_only(&manifest, true, false).unwrap();
        let rows = json_rows(&games).unwrap();
        assert_eq!(rows[0]["readOnly"], serde_json::Value::Bool(true));

        set_read_only(&manifest, false, false).unwrap();
    }
}
