use quittance_render_lopdf::RenderError;
use thiserror::Error;

/// Why a receipt could not be built.
///
/// Logo problems never show up here; they are absorbed when the logo is
/// prepared and only visible through `LogoResolver::status`.
#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Invalid receipt record: {}", .problems.join("; "))]
    InvalidRecord { problems: Vec<String> },

    #[error("Receipt content does not fit the page: {0}")]
    LayoutOverflow(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config is invalid: {0}")]
    Invalid(String),
}
