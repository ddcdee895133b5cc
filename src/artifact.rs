use quittance_types::LogoOrigin;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Content that did not make it onto the page under `OverflowPolicy::Clip`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Truncation {
    /// Line items replaced by the "... N more item(s)" row.
    pub hidden_items: usize,
    /// Fields whose text was cut short with "..." or printed with `?` for
    /// characters the standard fonts lack, in layout order.
    pub clipped_fields: Vec<String>,
}

impl Truncation {
    pub fn is_empty(&self) -> bool {
        self.hidden_items == 0 && self.clipped_fields.is_empty()
    }
}

/// A finalized receipt. The PDF bytes never change after the build returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    bytes: Vec<u8>,
    receipt_id: String,
    logo_origin: LogoOrigin,
    page_count: usize,
    truncation: Option<Truncation>,
}

impl DocumentArtifact {
    pub(crate) fn new(
        bytes: Vec<u8>,
        receipt_id: String,
        logo_origin: LogoOrigin,
        page_count: usize,
        truncation: Option<Truncation>,
    ) -> Self {
        Self {
            bytes,
            receipt_id,
            logo_origin,
            page_count,
            truncation,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn receipt_id(&self) -> &str {
        &self.receipt_id
    }

    /// Whether the canonical logo or the placeholder mark was placed.
    pub fn logo_origin(&self) -> LogoOrigin {
        self.logo_origin
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn truncation(&self) -> Option<&Truncation> {
        self.truncation.as_ref()
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.bytes)?;
        writer.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        self.write_to(File::create(path)?)
    }
}

impl AsRef<[u8]> for DocumentArtifact {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
