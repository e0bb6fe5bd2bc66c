//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::adapters::AppConfig;
use crate::app::render::render_structured;
use crate::app::{AppContainer, BitrateInteractor, BitrateRequest, DefaultAppContainer};
use crate::cli::args::{BitrateArgs, ProvidersArgs, UploadArgs};
use crate::domain::errors::DomainError;
use crate::domain::model::*;

/// Execute the bitrate command
pub fn bitrate(args: BitrateArgs, config: &AppConfig) -> Result<()> {
    let defaults = &config.bitrate;
    let params = BitrateParameters::new(
        args.size.unwrap_or(defaults.target_size_mb),
        args.duration.unwrap_or(defaults.duration_sec),
        args.margin.unwrap_or(defaults.safety_margin),
    );
    let preset = match args.preset.as_deref() {
        Some(name) => EncoderPreset::parse(name)?,
        None => defaults.preset,
    };
    let format = OutputFormat::parse(&args.format)?;

    info!(
        size_mb = params.target_size_mb,
        duration_sec = params.duration_sec,
        margin = params.safety_margin_percent,
        preset = %preset,
        "Calculating bitrate"
    );

    let response = BitrateInteractor::new().calculate(BitrateRequest {
        params,
        preset,
        format,
    })?;

    print!("{}", ensure_trailing_newline(response.summary));
    Ok(())
}

/// Execute the upload command
pub async fn upload(args: UploadArgs, config: &AppConfig) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let request = read_upload_request(&args.input, args.media_type.as_deref()).await?;

    info!("Input: {}", args.input.display());
    let container = DefaultAppContainer::new(config).context("Failed to set up providers")?;
    let mut session = container.upload_session();

    let run = session.begin(request).await?;

    match render_structured(&run, format)? {
        Some(rendered) => print!("{}", ensure_trailing_newline(rendered)),
        None => display_upload_run(&run, &args.input, args.verbose),
    }

    if session.is_local_only() && args.hold {
        eprintln!("Holding local preview. Press Ctrl-C to discard it.");
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        session.discard();
        info!("Local preview discarded");
    }

    Ok(())
}

/// Execute the providers command
pub fn providers(args: ProvidersArgs, config: &AppConfig) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let providers = config.providers_by_priority();

    #[derive(Serialize)]
    struct ProviderList<'a> {
        attempt_timeout_secs: u64,
        providers: &'a [ProviderSpec],
    }

    let listing = ProviderList {
        attempt_timeout_secs: config.upload.attempt_timeout_secs,
        providers: &providers,
    };

    match render_structured(&listing, format)? {
        Some(rendered) => print!("{}", ensure_trailing_newline(rendered)),
        None => display_providers(&providers, config),
    }
    Ok(())
}

/// Read a file selection into an upload request
async fn read_upload_request(path: &Path, media_type: Option<&str>) -> Result<UploadRequest> {
    if !path.exists() {
        return Err(DomainError::FileNotFound(path.display().to_string()).into());
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| DomainError::BadArgs(format!("Not a file path: {}", path.display())))?;

    Ok(match media_type {
        Some(media_type) => UploadRequest::new(bytes, media_type, filename),
        None => UploadRequest::with_guessed_type(bytes, filename),
    })
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Display an upload run in human-readable format
fn display_upload_run(run: &UploadRun, input: &Path, verbose: bool) {
    match &run.outcome {
        UploadOutcome::RemoteHosted { url, provider } => {
            println!("Hotlink ready ({})", provider);
            println!("{}", url);
        }
        UploadOutcome::LocalOnly { handle } => {
            println!("LOCAL MODE: {}", handle.uri);
            println!(
                "All cloud providers rejected the upload. {} is available as a local preview for this session only.",
                input.display()
            );
        }
    }

    if verbose || run.outcome.is_local_only() {
        println!();
        println!("Attempts:");
        for (i, attempt) in run.attempts.iter().enumerate() {
            let detail = attempt
                .outcome
                .url()
                .or_else(|| attempt.outcome.reason())
                .unwrap_or_default();
            println!(
                "  {}. {} [{}] {} ({})",
                i + 1,
                attempt.provider,
                attempt.outcome.reason_tag(),
                detail,
                attempt.timestamp.format("%H:%M:%S%.3f")
            );
        }
    }
}

/// Display providers in human-readable format
fn display_providers(providers: &[ProviderSpec], config: &AppConfig) {
    println!("Providers (in try order)");
    println!("========================");
    for (i, provider) in providers.iter().enumerate() {
        println!("  {}. {} (priority {})", i + 1, provider.name, provider.priority);
        println!("     Endpoint: {}", provider.endpoint);
        println!("     Field: {}", provider.file_field);
        println!(
            "     Success: {}  URL: {}",
            provider.success_path, provider.url_path
        );
    }
    println!();
    match config.upload.attempt_timeout() {
        Some(limit) => println!("Attempt timeout: {}s", limit.as_secs()),
        None => println!("Attempt timeout: none"),
    }
    println!(
        "Accepted container: .{} ({})",
        config.container.extension, config.container.media_type
    );
}
