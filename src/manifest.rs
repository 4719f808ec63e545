//! The package manifest (`package.json`) holding the release version.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ReleaseError, Result};

/// Line terminator appended after the serialized manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// The host convention: CRLF on Windows, LF elsewhere.
    pub fn native() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A parsed manifest, keeping its key order.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Value,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|e| {
            ReleaseError::manifest(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let document = serde_json::from_str(&content)?;
        Ok(Manifest { path, document })
    }

    /// The `version` field.
    pub fn version(&self) -> Result<&str> {
        self.document
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ReleaseError::manifest(format!(
                    "{} has no string \"version\" field",
                    self.path.display()
                ))
            })
    }

    /// Replaces the `version` field, leaving every other field in place.
    pub fn set_version(&mut self, version: &str) -> Result<()> {
        let object = self.document.as_object_mut().ok_or_else(|| {
            ReleaseError::manifest(format!("{} is not a JSON object", self.path.display()))
        })?;
        object.insert("version".to_string(), Value::String(version.to_string()));
        Ok(())
    }

    /// Serializes with 2-space indentation followed by one line terminator.
    pub fn render(&self, line_ending: LineEnding) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.document)?;
        content.push_str(line_ending.as_str());
        Ok(content)
    }

    /// Writes the manifest back to its file.
    pub fn save(&self, line_ending: LineEnding) -> Result<()> {
        fs::write(&self.path, self.render(line_ending)?)?;
        tracing::debug!(path = %self.path.display(), "manifest written");
        Ok(())
    }
}
