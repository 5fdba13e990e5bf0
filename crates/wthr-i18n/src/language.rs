use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "sr")]
    Serbian,
}

impl Language {
    /// Every supported language, in picker order.
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::German,
        Language::Russian,
        Language::Serbian,
    ];

    /// Language whose table every other table falls back to.
    pub const BASE: Language = Language::English;

    /// ISO 639-1 code, also the persisted preference value.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::Russian => "ru",
            Language::Serbian => "sr",
        }
    }

    /// Name of the language in the language itself.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "Deutsch",
            Language::Russian => "Русский",
            Language::Serbian => "Srpski",
        }
    }

    /// Parse a persisted language code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
