use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::types::{Manifest, ManifestStack};
use crate::{Error, MANIFEST_FILE, Result, STACK_FILE, SYNTH_VERSION, Stack};

/// Root of a synthesis run: an ordered set of stacks and an output directory.
#[derive(Debug, Clone)]
pub struct App {
    outdir: PathBuf,
    stacks: Vec<Stack>,
}

impl App {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
            stacks: Vec::new(),
        }
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Add an empty stack and return it for declaration.
    pub fn stack(&mut self, name: &str) -> Result<&mut Stack> {
        if self.stacks.iter().any(|s| s.name() == name) {
            return Err(Error::DuplicateStack(name.to_string()));
        }
        self.stacks.push(Stack::new(name)?);

        let idx = self.stacks.len() - 1;
        Ok(&mut self.stacks[idx])
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn get(&self, name: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.name() == name)
    }

    /// Write every stack and the manifest to the output directory.
    ///
    /// All stacks are rendered before the first file is touched, so an invalid
    /// stack leaves a previous output untouched.
    pub fn synth(&self) -> Result<Manifest> {
        let mut rendered = Vec::with_capacity(self.stacks.len());
        for stack in &self.stacks {
            rendered.push((stack.name(), stack.to_json()?));
        }

        let mut manifest = Manifest {
            version: SYNTH_VERSION.to_string(),
            outdir: self.outdir.display().to_string(),
            stacks: Default::default(),
        };

        for (name, json) in rendered {
            let entry = ManifestStack::for_stack(name);
            let dir = self.outdir.join(&entry.working_directory);
            fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

            let path = dir.join(STACK_FILE);
            write(&path, &json)?;
            info!(stack = name, path = %path.display(), "stack synthesized");

            manifest.stacks.insert(name.to_string(), entry);
        }

        let path = self.outdir.join(MANIFEST_FILE);
        write(&path, &serde_json::to_string_pretty(&manifest)?)?;
        info!(
            stacks = manifest.stacks.len(),
            path = %path.display(),
            "manifest written"
        );

        Ok(manifest)
    }
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
