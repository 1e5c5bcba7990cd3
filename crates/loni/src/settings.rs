//! User preferences shown in the settings panel.
//!
//! None of these change what is sent upstream; the selected mode is only
//! displayed next to the composer. Settings live for the session only.
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    #[strum(to_string = "Quick Response")]
    Quick,
    #[strum(to_string = "Think Deeper")]
    Deep,
    #[strum(to_string = "Study Mode")]
    Study,
    #[strum(to_string = "Smart Mode")]
    Smart,
}

impl Mode {
    pub fn id(&self) -> &'static str {
        match self {
            Mode::Quick => "quick",
            Mode::Deep => "deep",
            Mode::Study => "study",
            Mode::Smart => "smart",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::Quick => "Fast, concise answers",
            Mode::Deep => "Thorough analysis",
            Mode::Study => "Educational focus",
            Mode::Smart => "Adaptive responses",
        }
    }

    /// Accepts the id (`deep`), the display name (`Think Deeper`) or a 1-based index
    pub fn parse(input: &str) -> Option<Mode> {
        let input = input.trim();
        if let Ok(index) = input.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| Mode::iter().nth(i));
        }
        Mode::iter().find(|mode| {
            mode.id().eq_ignore_ascii_case(input) || mode.to_string().eq_ignore_ascii_case(input)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceType {
    #[default]
    Neural,
    Professional,
    Casual,
}

impl VoiceType {
    pub fn parse(input: &str) -> Option<VoiceType> {
        VoiceType::iter().find(|voice| voice.to_string().eq_ignore_ascii_case(input.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub mode: Mode,
    pub voice_enabled: bool,
    pub voice_type: VoiceType,
    pub memory_enabled: bool,
    pub data_sharing: bool,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            voice_enabled: false,
            voice_type: VoiceType::default(),
            memory_enabled: true,
            data_sharing: false,
            language: "en".to_string(),
        }
    }
}

impl Settings {
    pub fn toggle_voice(&mut self) -> bool {
        self.voice_enabled = !self.voice_enabled;
        self.voice_enabled
    }

    pub fn toggle_memory(&mut self) -> bool {
        self.memory_enabled = !self.memory_enabled;
        self.memory_enabled
    }

    pub fn toggle_data_sharing(&mut self) -> bool {
        self.data_sharing = !self.data_sharing;
        self.data_sharing
    }

    pub fn set_language<S: Into<String>>(&mut self, language: S) {
        self.language = language.into();
    }

    /// Settings are not written anywhere; saving just records them in the log
    pub fn save(&self) {
        info!(settings = ?self, "saved settings");
    }

    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Mode", self.mode.to_string()),
            ("Voice responses", on_off(self.voice_enabled)),
            ("Voice", self.voice_type.to_string()),
            ("Memory", on_off(self.memory_enabled)),
            ("Data sharing", on_off(self.data_sharing)),
            ("Language", self.language.clone()),
        ]
    }
}

fn on_off(value: bool) -> String {
    let text = if value { "on" } else { "off" };
    text.to_string()
}
