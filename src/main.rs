use appstream_check::adapters::outbound::console::StderrProgressReporter;
use appstream_check::adapters::outbound::filesystem::{DatasetFile, OsReleaseHostInfo, StdoutPresenter};
use appstream_check::adapters::outbound::network::RedHatLifecycleClient;
use appstream_check::adapters::outbound::system::{
    DnfPackageRemover, RpmDumpInventoryCollector, RpmInventoryCollector,
};
use appstream_check::application::dto::{CleanupRequest, OutputFormat};
use appstream_check::application::factories::{FormatterFactory, PresenterFactory};
use appstream_check::application::read_models::CheckReport;
use appstream_check::application::use_cases::{
    CheckLifecycleUseCase, CleanupPackagesUseCase, FetchLifecycleDataUseCase,
};
use appstream_check::cli::{CheckArgs, CleanupArgs, Cli, Command, FetchArgs, LogLevel};
use appstream_check::config::{load_config, CheckSettings, CleanupSettings, FetchSettings};
use appstream_check::ports::outbound::{InventoryCollector, OutputPresenter};
use appstream_check::shared::error::ExitCode;
use appstream_check::shared::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // clap exits with code 2 on invalid arguments
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    match run(cli) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(log_level: Option<LogLevel>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level.as_filter()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Check(args) => run_check(&args),
        Command::Cleanup(args) => run_cleanup(&args),
        Command::Fetch(args) => run_fetch(&args),
    }
}

fn run_check(args: &CheckArgs) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let settings = CheckSettings::resolve(args, config.as_ref())?;

    let report = match &settings.inventory_file {
        Some(path) => check_with(RpmDumpInventoryCollector::new(path.clone()), &settings)?,
        None => check_with(RpmInventoryCollector::new(), &settings)?,
    };

    present_report(&report, settings.format, settings.output.clone())?;
    Ok(exit_code_for(&report, settings.fail_on_match))
}

fn check_with<IC: InventoryCollector>(collector: IC, settings: &CheckSettings) -> Result<CheckReport> {
    // Create use case with injected dependencies
    let use_case = CheckLifecycleUseCase::new(
        DatasetFile::new(),
        collector,
        OsReleaseHostInfo::new(),
        StderrProgressReporter::new(),
    );
    use_case.execute(&settings.to_request())
}

fn run_cleanup(args: &CleanupArgs) -> Result<ExitCode> {
    let config = load_config(args.check.config.as_deref())?;
    let settings = CleanupSettings::resolve(args, config.as_ref())?;

    let report = match &settings.check.inventory_file {
        Some(path) => cleanup_with(RpmDumpInventoryCollector::new(path.clone()), &settings)?,
        None => cleanup_with(RpmInventoryCollector::new(), &settings)?,
    };

    present_report(&report, settings.check.format, settings.check.output.clone())?;
    Ok(exit_code_for(&report, settings.check.fail_on_match))
}

fn cleanup_with<IC: InventoryCollector>(
    collector: IC,
    settings: &CleanupSettings,
) -> Result<CheckReport> {
    let check = CheckLifecycleUseCase::new(
        DatasetFile::new(),
        collector,
        OsReleaseHostInfo::new(),
        StderrProgressReporter::new(),
    );
    let use_case = CleanupPackagesUseCase::new(check, DnfPackageRemover::new(settings.use_sudo));
    use_case.execute(&CleanupRequest::new(settings.check.to_request(), settings.dry_run))
}

fn run_fetch(args: &FetchArgs) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let settings = FetchSettings::resolve(args, config.as_ref())?;

    let client = RedHatLifecycleClient::new(settings.client)?;
    let use_case = FetchLifecycleDataUseCase::new(
        client,
        DatasetFile::new(),
        StderrProgressReporter::new(),
    );
    let response = use_case.execute(&settings.request)?;

    if let Some(raw) = response.raw_payload {
        let mut output = serde_json::to_string_pretty(&raw)?;
        output.push('\n');
        StdoutPresenter::new().present(&output)?;
    } else {
        tracing::info!(
            records = response.record_count,
            entries = response.entry_count,
            skipped = response.skipped.len(),
            collisions = response.collisions.len(),
            "dataset written"
        );
    }

    Ok(ExitCode::Success)
}

fn present_report(report: &CheckReport, format: OutputFormat, output: Option<PathBuf>) -> Result<()> {
    let formatter = FormatterFactory::create(format);
    let formatted_output = formatter.format(report)?;

    let presenter = PresenterFactory::create(PresenterFactory::type_for(output));
    presenter.present(&formatted_output)
}

/// Removal failures outrank `--fail-on-match`
fn exit_code_for(report: &CheckReport, fail_on_match: bool) -> ExitCode {
    if report.removal_failed() {
        ExitCode::RemovalFailed
    } else if fail_on_match && report.any_match {
        ExitCode::EndOfLifeDetected
    } else {
        ExitCode::Success
    }
}
