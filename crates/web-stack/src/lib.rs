//! A public VPC with one EC2 web server, declared for the `dev` and `prod` stacks.

pub mod config;
pub mod stack;

use std::path::PathBuf;

use tf_synth::App;
use tracing::info;

pub use stack::{WebStackOutputs, build_web_stack};

/// Stacks declared by [`build_app`], all with identical configuration.
pub const ENVIRONMENTS: [&str; 2] = ["dev", "prod"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("synthesis error: {0}")]
    Synth(#[from] tf_synth::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Build an app with every environment declared, ready for synthesis.
pub fn build_app(outdir: impl Into<PathBuf>) -> Result<App> {
    let mut app = App::new(outdir);

    for env in ENVIRONMENTS {
        build_web_stack(app.stack(env)?)?;
        info!(stack = env, "declared web stack");
    }

    Ok(app)
}
