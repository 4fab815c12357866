use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use web_stack::config::AppConfig;

fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "synthesis failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> web_stack::Result<()> {
    let config = AppConfig::from_env()?;

    let app = web_stack::build_app(&config.outdir)?;
    let manifest = app.synth()?;

    tracing::info!(
        outdir = %config.outdir.display(),
        stacks = ?manifest.stacks.keys().collect::<Vec<_>>(),
        "synthesis complete, run terraform from each stack directory"
    );
    Ok(())
}
