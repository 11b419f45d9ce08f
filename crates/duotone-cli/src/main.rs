use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use duotone_cli::args::Args;
use duotone_core::settings::SettingsFile;
use duotone_media::processor;

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("duotone={log_level},duotone_media={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let settings = args.resolve_settings().context("invalid settings")?;

    if let Some(path) = &args.save_settings {
        SettingsFile::new(settings)
            .save(path)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved settings");
    }

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let output = args.output_path(millis);

    let report = processor::process_file(&args.input, &output, &settings, &args.process_options())
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    tracing::info!(
        output = %output.display(),
        width = report.output_width,
        height = report.output_height,
        elapsed_ms = report.timings.transform.as_millis() as u64,
        "done"
    );
    Ok(())
}
