//! Shared helpers for the receipt integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use image::{DynamicImage, Rgba, RgbaImage};
use lopdf::content::Content;
use lopdf::{Document, ObjectId};
use quittance::{
    AccountSummary, AssetError, AssetSource, LogoConfig, LogoResolver, PaymentDetails, ReceiptKind, ReceiptRecord,
    SharedAssetData,
};
use rust_decimal::Decimal;
use std::io::Cursor;
use std::sync::Arc;

pub fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

/// `{payer: "Jane Doe", amount: 1500.00, currency: "INR", date: 2024-01-10, items: [Tuition 1500.00], id: "R-001"}`
pub fn jane_doe() -> ReceiptRecord {
    ReceiptRecord::new("R-001", "Jane Doe", d("1500.00"), "INR", date()).with_item("Tuition", d("1500.00"))
}

pub fn payment_details() -> PaymentDetails {
    PaymentDetails {
        method: "UPI".into(),
        fee_type: Some("Tuition fee".into()),
        notes: Some("First installment".into()),
        received_by: Some("admin".into()),
        reference: Some("STU-042".into()),
        account: Some(AccountSummary {
            total_fee: d("5000.00"),
            discount: d("250.00"),
            paid_to_date: d("1500.00"),
            balance: d("3250.00"),
        }),
    }
}

pub fn jane_doe_payment() -> ReceiptRecord {
    jane_doe().with_kind(ReceiptKind::Payment(payment_details()))
}

/// A PNG with a transparent border, `width` x `height` pixels.
pub fn png_logo(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([200, 40, 40, 255])
        }
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// A source whose every load fails, standing in for an unreachable asset store.
#[derive(Debug)]
pub struct UnavailableSource;

impl AssetSource for UnavailableSource {
    fn load(&self, path: &str) -> Result<SharedAssetData, AssetError> {
        Err(AssetError::LoadFailed {
            path: path.to_string(),
            message: "asset store offline".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "UnavailableSource"
    }
}

pub fn unavailable_logo() -> Arc<LogoResolver> {
    let config = LogoConfig::default().with_asset("logo.png");
    Arc::new(LogoResolver::prepare(&UnavailableSource, &config))
}

/// All text on all pages, one page per line group.
pub fn extract_text(pdf_bytes: &[u8]) -> String {
    let doc = Document::load_mem(pdf_bytes).unwrap();
    let pages = doc.get_pages();
    let mut text = String::new();
    for page_num in 1..=pages.len() {
        text.push_str(&doc.extract_text(&[page_num as u32]).unwrap());
        text.push('\n');
    }
    text
}

fn first_page(doc: &Document) -> ObjectId {
    *doc.get_pages().get(&1).unwrap()
}

/// The `cm` operands used to place the logo XObject on the first page.
pub fn logo_placement(pdf_bytes: &[u8]) -> Vec<f32> {
    let doc = Document::load_mem(pdf_bytes).unwrap();
    let content = Content::decode(&doc.get_page_content(first_page(&doc)).unwrap()).unwrap();
    let ops = &content.operations;
    let do_index = ops
        .iter()
        .position(|op| op.operator == "Do" && op.operands[0].as_name().ok() == Some(b"Logo".as_slice()))
        .unwrap();
    let cm = &ops[do_index - 1];
    assert_eq!(cm.operator, "cm");
    cm.operands.iter().map(|o| o.as_float().unwrap()).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogoXObject {
    pub width: i64,
    pub height: i64,
    pub filter: String,
    pub has_soft_mask: bool,
    pub data: Vec<u8>,
}

/// The image registered as `/Logo` in the first page's resources.
pub fn logo_xobject(pdf_bytes: &[u8]) -> LogoXObject {
    let doc = Document::load_mem(pdf_bytes).unwrap();
    let page = doc.get_dictionary(first_page(&doc)).unwrap();
    let resources = doc
        .get_dictionary(page.get(b"Resources").unwrap().as_reference().unwrap())
        .unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let logo_id = xobjects.get(b"Logo").unwrap().as_reference().unwrap();
    let stream = doc.get_object(logo_id).unwrap().as_stream().unwrap();

    LogoXObject {
        width: stream.dict.get(b"Width").unwrap().as_i64().unwrap(),
        height: stream.dict.get(b"Height").unwrap().as_i64().unwrap(),
        filter: String::from_utf8_lossy(stream.dict.get(b"Filter").unwrap().as_name().unwrap()).into_owned(),
        has_soft_mask: stream.dict.has(b"SMask"),
        data: stream.content.clone(),
    }
}
