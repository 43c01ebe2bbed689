//! Race settings owned by a room
//!
//! `Settings` is always fully populated; clients update it either with a
//! shallow-merged partial patch (`updateSettings`) or by wholesale
//! replacement at game start.

use serde::{Deserialize, Serialize};

/// Race mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Time,
    Words,
    Quote,
}

/// Word difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Full race settings for a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub mode: Mode,
    pub time_limit: u32,
    pub word_count: u32,
    pub difficulty: Difficulty,
    pub punctuation: bool,
    pub numbers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Time,
            time_limit: 15,
            word_count: 25,
            difficulty: Difficulty::Easy,
            punctuation: false,
            numbers: false,
        }
    }
}

/// Partial settings update sent by the host
///
/// Absent fields leave the current value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub mode: Option<Mode>,
    pub time_limit: Option<u32>,
    pub word_count: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub punctuation: Option<bool>,
    pub numbers: Option<bool>,
}

impl Settings {
    /// Shallow-merge a patch into these settings
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(time_limit) = patch.time_limit {
            self.time_limit = time_limit;
        }
        if let Some(word_count) = patch.word_count {
            self.word_count = word_count;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(punctuation) = patch.punctuation {
            self.punctuation = punctuation;
        }
        if let Some(numbers) = patch.numbers {
            self.numbers = numbers;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.mode, Mode::Time);
        assert_eq!(s.time_limit, 15);
        assert_eq!(s.word_count, 25);
        assert_eq!(s.difficulty, Difficulty::Easy);
        assert!(!s.punctuation);
        assert!(!s.numbers);
    }

    #[test]
    fn test_merge_preserves_absent_fields() {
        let mut s = Settings {
            punctuation: true,
            ..Settings::default()
        };
        s.merge(SettingsPatch {
            time_limit: Some(30),
            ..SettingsPatch::default()
        });
        assert_eq!(s.mode, Mode::Time);
        assert_eq!(s.time_limit, 30);
        assert!(s.punctuation);
    }

    #[test]
    fn test_patch_deserialize_partial() {
        let patch: SettingsPatch = serde_json::from_str(r#"{"timeLimit": 60}"#).unwrap();
        assert_eq!(patch.time_limit, Some(60));
        assert!(patch.mode.is_none());
        assert!(patch.punctuation.is_none());
    }

    #[test]
    fn test_settings_wire_names() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"timeLimit\":15"));
        assert!(json.contains("\"wordCount\":25"));
        assert!(json.contains("\"mode\":\"time\""));
        assert!(json.contains("\"difficulty\":\"easy\""));
    }
}
