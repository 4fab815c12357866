//! Declarative Terraform stacks synthesized to Terraform JSON.
//!
//! Stacks collect providers, variables, data sources, resources and outputs;
//! an [`App`] writes each stack to `stacks/<name>/cdk.tf.json` under its output
//! directory together with a `manifest.json`. Planning and applying is left to
//! the `terraform` CLI.

mod app;
mod stack;
mod token;
mod types;

use std::path::PathBuf;

use serde::Serialize;

pub use app::App;
pub use stack::Stack;
pub use token::{DataRef, Expr, ResourceRef};
pub use types::*;

/// Version stamped into every synthesized document and manifest.
pub const SYNTH_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of a synthesized stack inside its working directory.
pub const STACK_FILE: &str = "cdk.tf.json";

/// File name of the manifest at the root of the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid logical id: {0:?}")]
    InvalidId(String),

    #[error("stack {stack}: there is already an element with id {id:?}")]
    DuplicateConstruct { stack: String, id: String },

    #[error("stack {stack}: provider {provider} is already configured with this alias")]
    DuplicateProvider { stack: String, provider: String },

    #[error("duplicate stack: {0}")]
    DuplicateStack(String),

    #[error("stack {stack}: reference ${{{reference}}} does not resolve to a declared element")]
    UnresolvedReference { stack: String, reference: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Provider configuration (`provider "<NAME>" { ... }`).
pub trait Provider: Serialize {
    /// Local provider name, e.g. `aws`.
    const NAME: &'static str;

    /// Registry source, e.g. `hashicorp/aws`.
    const SOURCE: &'static str;

    /// Version constraint recorded under `required_providers`.
    const VERSION: &'static str;
}

/// Managed resource configuration (`resource "<TYPE>" "<id>" { ... }`).
pub trait Resource: Serialize {
    const TYPE: &'static str;

    /// Typed handle returned on declaration.
    type Ref: From<ResourceRef>;
}

/// Data source configuration (`data "<TYPE>" "<id>" { ... }`).
pub trait DataSource: Serialize {
    const TYPE: &'static str;

    type Ref: From<DataRef>;
}
