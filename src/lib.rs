//! # quittance
//!
//! Fixed-layout PDF receipts with an institutional logo that is always ready
//! to place.
//!
//! Logo loading is split from document building. A [`LogoResolver`] is
//! prepared once, possibly asynchronously and with a timeout, and falls back
//! to a synthesized placeholder mark if the asset can't be had. After that,
//! [`ReceiptAssembler::build`] is a synchronous call that resolves the logo
//! from memory, lays out the receipt and returns a [`DocumentArtifact`].
//!
//! ```no_run
//! use quittance::{LogoConfig, LogoResolver, ReceiptAssembler, ReceiptConfig, ReceiptRecord};
//! use quittance::FilesystemAssetSource;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = ReceiptConfig::for_institution("Sunrise Institute");
//! config.logo.asset = Some("logo.png".into());
//! let logo = LogoResolver::prepare(&FilesystemAssetSource::new("assets"), &config.logo);
//!
//! let assembler = ReceiptAssembler::new(config, Arc::new(logo));
//! let record: ReceiptRecord = serde_json::from_str(&std::fs::read_to_string("record.json")?)?;
//! assembler.build(&record)?.save("receipt.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod assembler;
pub mod config;
pub mod error;
pub mod money;
pub mod receipt_number;

pub use artifact::{DocumentArtifact, Truncation};
pub use assembler::ReceiptAssembler;
pub use config::{InstitutionProfile, OverflowPolicy, PageSize, ReceiptConfig};
pub use error::{ConfigError, ReceiptError};

pub use quittance_branding::{
    global, install_global, LogoConfig, LogoResolver, LogoStatus, MarkSource, PlaceholderSpec,
};
pub use quittance_resource::{FilesystemAssetSource, InMemoryAssetSource};
pub use quittance_traits::{AssetError, AssetSource, SharedAssetData};
pub use quittance_types::{
    AccountSummary, ImageFormat, LineItem, LogoOrigin, PaymentDetails, ReceiptKind, ReceiptRecord,
    ResolvedImage,
};
