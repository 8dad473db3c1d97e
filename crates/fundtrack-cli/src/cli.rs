use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use fundtrack_types::SnapshotDate;

#[derive(Parser)]
#[command(
    name = "fundtrack",
    about = "Daily ETF holdings tracker — store snapshots, compare, report",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Data directory holding YYYY-MM-DD.csv snapshots
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Threshold configuration file (missing file uses defaults)
    #[arg(long, global = true, default_value = "fundtrack.toml")]
    pub config: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List stored snapshot dates
    Dates(DatesArgs),
    /// Print a stored snapshot
    Show(ShowArgs),
    /// Compare a snapshot against the previous trading day's
    Diff(DiffArgs),
    /// Write the change table and summary for a date
    Report(ReportArgs),
}

#[derive(Args)]
pub struct DatesArgs {}

#[derive(Args)]
pub struct ShowArgs {
    /// Snapshot date (default: latest stored)
    pub date: Option<SnapshotDate>,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Current snapshot date (default: latest stored)
    pub date: Option<SnapshotDate>,

    /// Explicit base date instead of the previous stored trading day
    #[arg(long)]
    pub base: Option<SnapshotDate>,

    /// Include unchanged entries in the listing
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Current snapshot date (default: latest stored)
    pub date: Option<SnapshotDate>,

    /// Output directory for report artifacts
    #[arg(long, default_value = "reports")]
    pub out_dir: PathBuf,

    /// Include unchanged rows in the change table
    #[arg(long)]
    pub all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dates() {
        let cli = Cli::try_parse_from(["fundtrack", "dates"]).unwrap();
        assert!(matches!(cli.command, Command::Dates(_)));
    }

    #[test]
    fn parse_show_with_date() {
        let cli = Cli::try_parse_from(["fundtrack", "show", "2025-08-06"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.date, Some(SnapshotDate::parse("2025-08-06").unwrap()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_show_defaults_to_latest() {
        let cli = Cli::try_parse_from(["fundtrack", "show"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.date, None);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn reject_malformed_date() {
        assert!(Cli::try_parse_from(["fundtrack", "show", "08/06/2025"]).is_err());
    }

    #[test]
    fn parse_diff_with_base() {
        let cli =
            Cli::try_parse_from(["fundtrack", "diff", "2025-08-06", "--base", "2025-08-04"])
                .unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.date, Some(SnapshotDate::parse("2025-08-06").unwrap()));
            assert_eq!(args.base, Some(SnapshotDate::parse("2025-08-04").unwrap()));
            assert!(!args.all);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_diff_all() {
        let cli = Cli::try_parse_from(["fundtrack", "diff", "--all"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert!(args.all);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_report_out_dir() {
        let cli =
            Cli::try_parse_from(["fundtrack", "report", "--out-dir", "/tmp/reports"]).unwrap();
        if let Command::Report(args) = cli.command {
            assert_eq!(args.out_dir, PathBuf::from("/tmp/reports"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_global_data_dir() {
        let cli =
            Cli::try_parse_from(["fundtrack", "--data-dir", "/srv/etf/data", "dates"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/srv/etf/data"));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["fundtrack", "--verbose", "dates"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["fundtrack", "--format", "json", "dates"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn default_paths() {
        let cli = Cli::try_parse_from(["fundtrack", "dates"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("data"));
        assert_eq!(cli.config, PathBuf::from("fundtrack.toml"));
    }
}
