//! The Document Assembler: validates a record, places the logo and the fixed
//! layout, and seals everything into a [`DocumentArtifact`].
//!
//! A build never waits on I/O. The logo comes from a [`LogoResolver`] that
//! was prepared ahead of time, and `resolve` is a plain synchronous call.

mod layout;
mod variant;

use crate::artifact::DocumentArtifact;
use crate::config::ReceiptConfig;
use crate::error::ReceiptError;
use layout::{compose, LOGO_RESOURCE};
use quittance_branding::LogoResolver;
use quittance_render_lopdf::fonts::unencodable;
use quittance_render_lopdf::{DocumentInfo, PdfDocumentWriter};
use quittance_types::ReceiptRecord;
use rust_decimal::Decimal;
use std::sync::Arc;
use variant::VariantContent;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const PRODUCER: &str = concat!("quittance ", env!("CARGO_PKG_VERSION"));

/// Builds receipt PDFs. Cheap to share: builds take `&self` and hold no locks.
#[derive(Debug, Clone)]
pub struct ReceiptAssembler {
    config: ReceiptConfig,
    logo: Arc<LogoResolver>,
}

impl ReceiptAssembler {
    pub fn new(config: ReceiptConfig, logo: Arc<LogoResolver>) -> Self {
        Self { config, logo }
    }

    /// An assembler using the process-wide logo, or the configured
    /// placeholder if none has been installed.
    pub fn with_global_logo(config: ReceiptConfig) -> Self {
        let logo = match quittance_branding::global() {
            Some(resolver) => resolver.clone(),
            None => {
                log::debug!("No global logo installed; assembler will draw the placeholder mark");
                LogoResolver::placeholder_only(config.logo.placeholder.clone())
            }
        };
        Self::new(config, Arc::new(logo))
    }

    pub fn config(&self) -> &ReceiptConfig {
        &self.config
    }

    pub fn logo(&self) -> &LogoResolver {
        &self.logo
    }

    /// Builds the receipt for `record`.
    ///
    /// Fails with `InvalidRecord` before any layout happens, and with
    /// `LayoutOverflow` according to the configured overflow policy. An
    /// unavailable logo is never an error.
    pub fn build(&self, record: &ReceiptRecord) -> Result<DocumentArtifact, ReceiptError> {
        validate(record)?;

        let page = self.config.page.dimensions();
        let mut writer = PdfDocumentWriter::new(page);

        let logo = self.logo.resolve();
        writer.add_image(LOGO_RESOURCE, &logo)?;

        let variant = VariantContent::for_record(record);
        let composition = compose(record, &variant, &self.config, page)?;
        writer.add_page(&composition.elements)?;
        let page_count = writer.page_count();

        let info = DocumentInfo {
            title: format!("Receipt {}", record.id.trim()),
            subject: Some(variant.subject.to_string()),
            author: Some(self.config.institution.name.clone()),
            producer: PRODUCER.to_string(),
            creation_date: Some(format!("D:{}000000", record.date.format("%Y%m%d"))),
        };
        let bytes = writer.finish(&info)?;

        if let Some(truncation) = &composition.truncation {
            log::warn!(
                "Receipt {} was truncated to fit the page: {} hidden item(s), clipped fields {:?}",
                record.id,
                truncation.hidden_items,
                truncation.clipped_fields
            );
        }
        log::debug!(
            "Built receipt {} ({} bytes, {:?} logo)",
            record.id,
            bytes.len(),
            logo.origin
        );

        Ok(DocumentArtifact::new(
            bytes,
            record.id.clone(),
            logo.origin,
            page_count,
            composition.truncation,
        ))
    }

    /// Builds independent receipts; results are in the order of `records`.
    pub fn build_batch(&self, records: &[ReceiptRecord]) -> Vec<Result<DocumentArtifact, ReceiptError>> {
        #[cfg(feature = "parallel")]
        {
            records.par_iter().map(|record| self.build(record)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            records.iter().map(|record| self.build(record)).collect()
        }
    }
}

/// Checks the preconditions of a build and reports every violation at once.
fn validate(record: &ReceiptRecord) -> Result<(), ReceiptError> {
    let mut problems = Vec::new();
    if record.id.trim().is_empty() {
        problems.push("receipt id is empty".to_string());
    }
    if record.payer.trim().is_empty() {
        problems.push("payer name is empty".to_string());
    }
    if record.currency.trim().is_empty() {
        problems.push("currency is empty".to_string());
    }
    // These two are never clipped, so they must also print exactly.
    for (field, value) in [("receipt id", &record.id), ("currency", &record.currency)] {
        if let Some(c) = unencodable(value.trim()).next() {
            problems.push(format!("{} contains {:?}, which the standard fonts cannot print", field, c));
        }
    }
    if record.amount < Decimal::ZERO {
        problems.push(format!("amount {} is negative", record.amount));
    }
    if let Some(payment) = record.payment_details() {
        if payment.method.trim().is_empty() {
            problems.push("payment method is empty".to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ReceiptError::InvalidRecord { problems })
    }
}
