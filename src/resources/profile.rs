//! Shell profile patch: append an activation block once.
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};

use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A block of lines that must appear in a shell profile file.
///
/// The file counts as patched when it contains `marker` anywhere, so a
/// block written by hand (or by an earlier run) is left alone.
#[derive(Debug, Clone)]
pub struct ProfileBlockResource {
    /// Profile file to patch.
    pub path: PathBuf,
    marker: String,
    lines: Vec<String>,
}

impl ProfileBlockResource {
    /// Create a profile patch that appends `lines` unless `marker` is found.
    #[must_use]
    pub fn new(path: PathBuf, marker: &str, lines: Vec<String>) -> Self {
        Self {
            path,
            marker: marker.to_string(),
            lines,
        }
    }

    /// Text appended to the file: a blank separator line, then the block.
    #[must_use]
    pub fn block(&self) -> String {
        let mut block = String::from("\n");
        for line in &self.lines {
            block.push_str(line);
            block.push('\n');
        }
        block
    }
}

impl Applicable for ProfileBlockResource {
    fn description(&self) -> String {
        format!("{} ({})", self.path.display(), self.marker)
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.current_state()? {
            ResourceState::Correct => Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Invalid { reason } => bail!(reason),
            ResourceState::Missing => {
                append(&self.path, &self.block())?;
                Ok(ResourceChange::Applied)
            }
        }
    }
}

impl Resource for ProfileBlockResource {
    fn current_state(&self) -> Result<ResourceState> {
        if self.path.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: format!("{} is a directory", self.path.display()),
            });
        }
        match fs::read(&self.path) {
            Ok(bytes) => {
                if String::from_utf8_lossy(&bytes).contains(&self.marker) {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Missing)
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ResourceState::Missing),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }
}

/// Append `text` to `path`, creating the file and its parent if missing.
fn append(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("writing {}", path.display()))
}
