use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::Duration;

/// Pause before the assistant acknowledges an upload
pub const ACKNOWLEDGEMENT_DELAY: Duration = Duration::from_millis(1500);

/// A file the user attached to the conversation.
///
/// Only its name and size are kept; the contents are never read or sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub size: u64,
}

impl Attachment {
    pub fn new<S: Into<String>>(name: S, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Cannot attach {}", path.display()))?;
        if !metadata.is_file() {
            bail!("Cannot attach {}: not a regular file", path.display());
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, metadata.len()))
    }

    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }

    /// Shown as the user's message
    pub fn user_notice(&self) -> String {
        format!("📎 Uploaded file: {} ({:.2} KB)", self.name, self.size_kb())
    }

    /// Shown as the assistant's reply
    pub fn acknowledgement(&self) -> String {
        format!(
            "I've received your file \"{}\". File analysis will be available soon.",
            self.name
        )
    }
}
