use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{ChatLogError, ChatLogResult};

const JSON_LOG_FILE: &str = "chat_log.json";
const TEXT_LOG_FILE: &str = "lonidata.txt";
const JSON_STAGING_FILE: &str = "chat_log.json.tmp";

/// One successful exchange with the model that answered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub model: String,
    pub prompt: String,
    pub response: String,
}

impl LogEntry {
    pub fn new<M, P, R>(model: M, prompt: P, response: R) -> Self
    where
        M: Into<String>,
        P: Into<String>,
        R: Into<String>,
    {
        Self {
            timestamp: Utc::now(),
            model: model.into(),
            prompt: prompt.into(),
            response: response.into(),
        }
    }

    /// Human-readable record appended to the plain-text log
    pub fn to_record(&self) -> String {
        format!(
            "[{}] ({})\nPrompt: {}\nResponse: {}\n\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.model,
            self.prompt,
            self.response
        )
    }
}

/// Accumulating log of successful exchanges.
///
/// Two files live in the log directory: `chat_log.json`, a JSON array that is
/// replaced on every append, and `lonidata.txt`, a plain-text transcript that
/// only ever grows.
#[derive(Debug, Clone)]
pub struct ChatLog {
    dir: PathBuf,
}

impl ChatLog {
    pub fn open<P: Into<PathBuf>>(dir: P) -> ChatLogResult<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    /// `~/.config/loni`
    pub fn default_dir() -> ChatLogResult<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(ChatLogError::NoHomeDir)?;
        Ok(home_dir.join(".config").join("loni"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(JSON_LOG_FILE)
    }

    pub fn text_path(&self) -> PathBuf {
        self.dir.join(TEXT_LOG_FILE)
    }

    pub fn entries(&self) -> ChatLogResult<Vec<LogEntry>> {
        let path = self.json_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Adds `entry` to both files.
    ///
    /// The new JSON array is staged next to the log and renamed into place
    /// only after the transcript write succeeds, so a failure leaves
    /// `chat_log.json` as it was.
    pub fn append(&self, entry: &LogEntry) -> ChatLogResult<()> {
        let mut entries = self.entries()?;
        entries.push(entry.clone());

        let staging = self.dir.join(JSON_STAGING_FILE);
        fs::write(&staging, serde_json::to_string_pretty(&entries)?)?;

        if let Err(e) = self.append_record(entry) {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }

        fs::rename(&staging, self.json_path())?;
        Ok(())
    }

    fn append_record(&self, entry: &LogEntry) -> ChatLogResult<()> {
        let mut transcript = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.text_path())?;
        transcript.write_all(entry.to_record().as_bytes())?;
        transcript.flush()?;
        Ok(())
    }
}
