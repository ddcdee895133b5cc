//! # quittance-branding
//!
//! The logo resolver. Branding assets are *prepared* ahead of time (this may
//! block or await) and *resolved* during document builds (this never does).
//!
//! - [`LogoResolver::prepare`] / [`LogoResolver::prepare_async`] load and decode
//!   the configured asset once, falling back to placeholder mode on any failure.
//! - [`LogoResolver::resolve`] hands out a fully materialized [`ResolvedImage`]:
//!   the prepared logo, or a placeholder mark drawn in-process on the spot.
//! - [`install_global`] / [`global`] hold one prepared resolver for the whole process.

mod config;
mod decode;
mod error;
mod glyphs;
mod global;
mod placeholder;
mod resolver;

pub use config::{LogoConfig, MarkSource, PlaceholderSpec};
pub use decode::decode_logo;
pub use error::PrepareError;
pub use global::{global, install_global};
pub use placeholder::synthesize_placeholder;
pub use resolver::{LogoResolver, LogoStatus};

pub use quittance_types::{ImageFormat, LogoOrigin, PixelData, ResolvedImage};
