//! The process-wide logo, prepared once at startup and read-only afterwards.

use crate::resolver::LogoResolver;
use once_cell::sync::OnceCell;

static GLOBAL_LOGO: OnceCell<LogoResolver> = OnceCell::new();

/// Installs `resolver` as the process-wide logo.
///
/// Only the first call wins; later calls get their resolver handed back.
pub fn install_global(resolver: LogoResolver) -> Result<&'static LogoResolver, LogoResolver> {
    GLOBAL_LOGO
        .try_insert(resolver)
        .map_err(|(_, rejected)| rejected)
}

/// The process-wide logo, if one has been installed.
pub fn global() -> Option<&'static LogoResolver> {
    GLOBAL_LOGO.get()
}
