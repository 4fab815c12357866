use std::env;
use std::path::PathBuf;

use crate::{Error, Result};

const DEFAULT_OUTDIR: &str = "cdktf.out";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub outdir: PathBuf,
}

impl AppConfig {
    /// Read config from the process environment. `main` loads `.env` first.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read config through `lookup`:
    ///
    /// - `CDKTF_OUTDIR` (default: `"cdktf.out"`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let outdir = lookup("CDKTF_OUTDIR").unwrap_or_else(|| DEFAULT_OUTDIR.into());
        if outdir.trim().is_empty() {
            return Err(Error::Config("CDKTF_OUTDIR must not be empty".into()));
        }

        Ok(Self {
            outdir: PathBuf::from(outdir),
        })
    }
}
