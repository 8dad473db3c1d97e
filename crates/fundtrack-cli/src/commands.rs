use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use rust_decimal::Decimal;
use tracing::info;

use fundtrack_diff::{compare_snapshots, DiffEntry, DiffStatus, HoldingsDiff};
use fundtrack_report::{
    change_table_path, summary_path, write_change_table, write_summary, DiffSummary, ReportConfig,
};
use fundtrack_store::{FsSnapshotStore, SnapshotStore};
use fundtrack_types::{Snapshot, SnapshotDate};

use crate::cli::{Cli, Command, DiffArgs, OutputFormat, ReportArgs, ShowArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        command,
        data_dir,
        config,
        format,
        ..
    } = cli;
    let store = FsSnapshotStore::new(data_dir);

    match command {
        Command::Dates(_) => cmd_dates(&store, &format),
        Command::Show(args) => cmd_show(&store, args, &format),
        Command::Diff(args) => cmd_diff(&store, args, &format),
        Command::Report(args) => cmd_report(&store, &config, args),
    }
}

fn resolve_current(
    store: &FsSnapshotStore,
    date: Option<SnapshotDate>,
) -> anyhow::Result<Snapshot> {
    match date {
        Some(d) => store
            .read(d)?
            .with_context(|| format!("no snapshot stored for {d}")),
        None => store
            .latest()?
            .context("no snapshots stored yet; populate the data directory first"),
    }
}

fn run_diff(
    store: &FsSnapshotStore,
    date: Option<SnapshotDate>,
    base: Option<SnapshotDate>,
) -> anyhow::Result<(HoldingsDiff, Snapshot)> {
    let current = resolve_current(store, date)?;
    let previous = match base {
        Some(b) => Some(
            store
                .read(b)?
                .with_context(|| format!("no snapshot stored for base date {b}"))?,
        ),
        None => store.previous_before(current.date)?,
    };

    match &previous {
        Some(p) => info!(date = %current.date, base = %p.date, "comparing snapshots"),
        None => info!(date = %current.date, "no previous snapshot, bootstrap run"),
    }

    let diff = compare_snapshots(previous.as_ref(), &current)?;
    Ok((diff, current))
}

fn cmd_dates(store: &FsSnapshotStore, format: &OutputFormat) -> anyhow::Result<()> {
    let dates = store.dates()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&dates)?),
        OutputFormat::Text => {
            if dates.is_empty() {
                println!("No snapshots stored.");
            }
            for date in dates {
                println!("{date}");
            }
        }
    }
    Ok(())
}

fn cmd_show(
    store: &FsSnapshotStore,
    args: ShowArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let snapshot = resolve_current(store, args.date)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => {
            println!(
                "{} — {} holdings, total weight {}%",
                snapshot.date.to_string().bold(),
                snapshot.len(),
                snapshot.total_weight()
            );
            for r in snapshot.iter() {
                println!(
                    "  {:<8} {:<24} {:>14} {:>8}%",
                    r.ticker.to_string().yellow(),
                    r.name,
                    r.shares,
                    r.weight
                );
            }
        }
    }
    Ok(())
}

fn cmd_diff(store: &FsSnapshotStore, args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (diff, _) = run_diff(store, args.date, args.base)?;
    match format {
        // JSON always carries the complete classification.
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => print_diff_text(&diff, args.all),
    }
    Ok(())
}

fn print_diff_text(diff: &HoldingsDiff, include_unchanged: bool) {
    let base = diff
        .base_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "(bootstrap)".into());
    println!(
        "{} vs {} — {} added, {} removed, {} changed, {} unchanged",
        diff.date.to_string().bold(),
        base.bold(),
        diff.additions().to_string().green(),
        diff.removals().to_string().red(),
        diff.changes().to_string().yellow(),
        diff.unchanged()
    );

    let entries: Vec<&DiffEntry> = if include_unchanged {
        diff.entries.iter().collect()
    } else {
        diff.changed_entries().collect()
    };
    if entries.is_empty() {
        println!("No movement.");
        return;
    }

    for e in entries {
        let status = match e.status {
            DiffStatus::Added => "ADDED    ".green().bold(),
            DiffStatus::Removed => "REMOVED  ".red().bold(),
            DiffStatus::Changed => "CHANGED  ".yellow().bold(),
            DiffStatus::Unchanged => "UNCHANGED".dimmed(),
        };
        println!(
            "  {status} {:<8} {:<24} shares {}  weight {}",
            e.ticker.to_string().bold(),
            e.name,
            span(e.shares_before, e.shares_after, e.shares_delta, ""),
            span(e.weight_before, e.weight_after, e.weight_delta, "%"),
        );
    }
}

/// Render `before -> after (+delta)` with absent sides shown as `—`.
fn span(
    before: Option<Decimal>,
    after: Option<Decimal>,
    delta: Option<Decimal>,
    unit: &str,
) -> String {
    let render = |v: Option<Decimal>| match v {
        Some(d) => format!("{d}{unit}"),
        None => "—".to_string(),
    };
    match delta {
        Some(d) => format!("{} -> {} ({})", render(before), render(after), signed(d)),
        None => format!("{} -> {}", render(before), render(after)),
    }
}

fn signed(d: Decimal) -> String {
    if d.is_sign_negative() {
        d.to_string()
    } else {
        format!("+{d}")
    }
}

fn cmd_report(
    store: &FsSnapshotStore,
    config_path: &Path,
    args: ReportArgs,
) -> anyhow::Result<()> {
    let config = ReportConfig::load(Some(config_path))?;
    let (diff, current) = run_diff(store, args.date, None)?;

    let table_path = change_table_path(&args.out_dir, diff.date);
    write_change_table(&diff, &table_path, args.all)?;

    let summary = DiffSummary::build(&diff, &current, &config);
    let json_path = summary_path(&args.out_dir, diff.date);
    write_summary(&summary, &json_path)?;

    println!(
        "{} Change table: {} ({} rows)",
        "✓".green().bold(),
        table_path.display(),
        diff.len() - if args.all { 0 } else { diff.unchanged() }
    );
    println!("{} Summary: {}", "✓".green().bold(), json_path.display());
    if diff.is_unchanged() {
        println!("No movement against {}.", summary_base(&diff));
    }
    Ok(())
}

fn summary_base(diff: &HoldingsDiff) -> String {
    diff.base_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "(bootstrap)".into())
}
