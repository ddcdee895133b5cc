//! Assembler configuration, loaded from JSON.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```json
//! {
//!   "institution": { "name": "Sunrise Institute", "address": ["12 MG Road", "Pune"] },
//!   "page": "a4",
//!   "overflow": "reject",
//!   "logo": { "asset": "logo.png", "placeholder": { "mark": { "initials_of": "Sunrise Institute" } } }
//! }
//! ```

use crate::error::ConfigError;
use quittance_branding::{LogoConfig, MarkSource};
use quittance_types::Size;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Smallest page edge the layout can work with, in points.
const MIN_PAGE_EDGE: f32 = 144.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReceiptConfig {
    pub institution: InstitutionProfile,
    pub page: PageSize,
    pub overflow: OverflowPolicy,
    /// Repeat the currency code in front of every row amount, not only the total.
    pub currency_in_rows: bool,
    pub logo: LogoConfig,
}

/// Issuer details printed in the receipt header and footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstitutionProfile {
    pub name: String,
    /// Address lines under the name; only the first two are printed.
    pub address: Vec<String>,
    pub footer: Option<String>,
}

impl Default for InstitutionProfile {
    fn default() -> Self {
        Self {
            name: "Institute".to_string(),
            address: Vec::new(),
            footer: Some("This is a computer-generated receipt.".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    A4,
    #[default]
    A5,
    /// Width and height in points.
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions(self) -> Size {
        match self {
            PageSize::A4 => Size::new(595.0, 842.0),
            PageSize::A5 => Size::new(420.0, 595.0),
            PageSize::Custom { width, height } => Size::new(width, height),
        }
    }
}

/// What to do when a receipt has more content than the page holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Drop what doesn't fit, mark it on the page and report it on the artifact.
    #[default]
    Clip,
    /// Fail the build with `LayoutOverflow`.
    Reject,
}

impl ReceiptConfig {
    /// Default configuration for `name`, with a placeholder mark made of its initials.
    pub fn for_institution(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut config = Self::default();
        config.logo.placeholder.mark = MarkSource::InitialsOf(name.clone());
        config.institution.name = name;
        config
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Size { width, height } = self.page.dimensions();
        if !(width.is_finite() && height.is_finite()) || width < MIN_PAGE_EDGE || height < MIN_PAGE_EDGE {
            return Err(ConfigError::Invalid(format!(
                "page size {}x{} is smaller than {}pt",
                width, height, MIN_PAGE_EDGE
            )));
        }
        if self.institution.name.trim().is_empty() {
            return Err(ConfigError::Invalid("institution name is empty".to_string()));
        }
        Ok(())
    }
}
