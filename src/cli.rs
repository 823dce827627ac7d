use crate::application::dto::OutputFormat;
use crate::ports::outbound::DatasetFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Check installed AppStream packages and module streams against Red Hat
/// lifecycle data
#[derive(Parser, Debug)]
#[command(name = "appstream-check")]
#[command(version)]
#[command(about = "Report and remove installed AppStream packages past end-of-life", long_about = None)]
pub struct Cli {
    /// Log verbosity; overrides RUST_LOG when given
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report installed packages whose lifecycle has ended
    Check(CheckArgs),
    /// Remove the packages `check` would report
    Cleanup(CleanupArgs),
    /// Download lifecycle data from the Red Hat API and write the grouped dataset
    Fetch(FetchArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Grouped dataset file written by `fetch`
    #[arg(short, long, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// OS major to check against (el8, el9, ...); detected from /etc/os-release when omitted
    #[arg(short, long, value_name = "MAJOR")]
    pub target_major: Option<String>,

    /// Reference date in YYYY-MM-DD format; defaults to today
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Output format: text, json or yaml
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Exit with code 1 when end-of-life packages are found
    #[arg(long)]
    pub fail_on_match: bool,

    /// Read the inventory from a saved `rpm -qa --qf '%{NAME} %{MODULARITYLABEL}\n'` dump
    #[arg(long, value_name = "PATH")]
    pub inventory_file: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to ./appstream-check.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CleanupArgs {
    #[command(flatten)]
    pub check: CheckArgs,

    /// Show what would be removed without removing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Run dnf through `sudo -n`
    #[arg(long)]
    pub sudo: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Where to write the grouped dataset
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Dataset format: json or yaml
    #[arg(long)]
    pub output_format: Option<DatasetFormat>,

    /// Variable name wrapping YAML output
    #[arg(long, value_name = "NAME")]
    pub output_var: Option<String>,

    /// Honor proxy settings from the environment
    #[arg(long)]
    pub trust_env: bool,

    /// Print the raw API response as JSON and write nothing
    #[arg(long)]
    pub print_raw: bool,

    /// Red Hat offline API token
    #[arg(long, env = "OFFLINE_ACCESS_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub offline_token: Option<String>,

    /// Config file (defaults to ./appstream-check.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_arguments() {
        let cli = Cli::try_parse_from([
            "appstream-check",
            "check",
            "--dataset",
            "data.yml",
            "--target-major",
            "el9",
            "--date",
            "2026-01-01",
            "--format",
            "json",
            "--fail-on-match",
        ])
        .unwrap();

        let Command::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.dataset, Some(PathBuf::from("data.yml")));
        assert_eq!(args.target_major.as_deref(), Some("el9"));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.fail_on_match);
    }

    #[test]
    fn test_parse_cleanup_flags() {
        let cli = Cli::try_parse_from(["appstream-check", "cleanup", "--dry-run", "--sudo", "-t", "el8"]).unwrap();
        let Command::Cleanup(args) = cli.command else {
            panic!("expected cleanup subcommand");
        };
        assert!(args.dry_run);
        assert!(args.sudo);
        assert_eq!(args.check.target_major.as_deref(), Some("el8"));
    }

    #[test]
    fn test_global_log_level() {
        let cli = Cli::try_parse_from(["appstream-check", "check", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = Cli::try_parse_from(["appstream-check", "check", "--format", "markdown"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_output_format() {
        let cli = Cli::try_parse_from(["appstream-check", "fetch", "--output-format", "json", "--print-raw"]).unwrap();
        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch subcommand");
        };
        assert_eq!(args.output_format, Some(DatasetFormat::Json));
        assert!(args.print_raw);
    }
}
