use quittance_types::Color;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of glyphs drawn in a placeholder mark.
pub(crate) const MAX_MARK_GLYPHS: usize = 4;

const CONNECTOR_WORDS: [&str; 5] = ["of", "and", "the", "for", "&"];

/// Where the logo comes from and what to draw when it can't be prepared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    /// Asset path handed to the `AssetSource`; `None` means placeholder only.
    pub asset: Option<String>,
    pub placeholder: PlaceholderSpec,
    /// Upper bound for `prepare_async`. Builds themselves never wait.
    pub prepare_timeout_ms: u64,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            asset: None,
            placeholder: PlaceholderSpec::default(),
            prepare_timeout_ms: 5_000,
        }
    }
}

impl LogoConfig {
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }
}

/// Appearance of the square stand-in mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderSpec {
    /// Edge length of the square surface in pixels (clamped to 16..=512).
    pub size_px: u32,
    pub background: Color,
    pub foreground: Color,
    pub mark: MarkSource,
}

impl Default for PlaceholderSpec {
    fn default() -> Self {
        Self {
            size_px: 96,
            background: Color::rgb(0x1F, 0x3A, 0x5F),
            foreground: Color::WHITE,
            mark: MarkSource::Text("LOGO".to_string()),
        }
    }
}

/// The text drawn inside the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkSource {
    /// Draw this text as-is (upper-cased).
    Text(String),
    /// Draw the initials of an institution name, e.g. "Sunrise Institute of Technology" -> "SIT".
    InitialsOf(String),
}

impl MarkSource {
    /// The glyph string that will actually be drawn.
    pub fn mark(&self) -> String {
        match self {
            MarkSource::Text(text) => text
                .trim()
                .chars()
                .flat_map(char::to_uppercase)
                .take(MAX_MARK_GLYPHS)
                .collect(),
            MarkSource::InitialsOf(name) => name
                .split_whitespace()
                .filter(|word| !CONNECTOR_WORDS.contains(&word.to_lowercase().as_str()))
                .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
                .flat_map(char::to_uppercase)
                .take(3)
                .collect(),
        }
    }
}
