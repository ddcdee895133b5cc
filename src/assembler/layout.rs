//! The fixed receipt layout.
//!
//! Coordinates are in points from the top-left corner of the page. The page
//! is split into a header (logo, institution, title, receipt number), a body
//! (payer, kind-specific details, line items) and a footer block anchored to
//! the bottom margin (total, account summary, notes, footer text). The body
//! only gets the space left between the two; line items that don't fit are
//! handled by the configured `OverflowPolicy`.

use super::variant::VariantContent;
use crate::artifact::Truncation;
use crate::config::{OverflowPolicy, ReceiptConfig};
use crate::error::ReceiptError;
use crate::money::{format_amount, format_total};
use quittance_render_lopdf::fonts::unencodable;
use quittance_render_lopdf::{FittedText, PositionedElement, StandardFont};
use quittance_types::{Color, Rect, ReceiptRecord, Size};
use rust_decimal::Decimal;

/// Resource name of the logo image XObject.
pub(crate) const LOGO_RESOURCE: &str = "Logo";

pub(crate) const MARGIN: f32 = 36.0;
pub(crate) const LOGO_SIZE: f32 = 56.0;

const GAP: f32 = 12.0;
const ROW_HEIGHT: f32 = 16.0;
/// Offset of text inside a row.
const ROW_INSET: f32 = 4.0;
const LABEL_COLUMN: f32 = 96.0;
const AMOUNT_COLUMN: f32 = 96.0;
const TOTAL_BLOCK: f32 = 24.0;
const FOOTER_BLOCK: f32 = 14.0;
/// Smallest size the receipt number and total may shrink to.
const MIN_PINNED_SIZE: f32 = 6.0;

const INK: Color = Color::rgb(0x1A, 0x1A, 0x1A);
const MUTED: Color = Color::rgb(0x59, 0x59, 0x59);
const RULE: Color = Color::rgb(0xB0, 0xB0, 0xB0);
const BAND: Color = Color::rgb(0xEE, 0xF1, 0xF5);

/// Elements for one receipt page, plus what had to be left out.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Composition {
    pub elements: Vec<PositionedElement>,
    pub truncation: Option<Truncation>,
}

/// Where the logo goes, whatever its intrinsic size.
pub(crate) fn logo_anchor() -> Rect {
    Rect::new(MARGIN, MARGIN, LOGO_SIZE, LOGO_SIZE)
}

pub(crate) fn compose(
    record: &ReceiptRecord,
    variant: &VariantContent<'_>,
    config: &ReceiptConfig,
    page: Size,
) -> Result<Composition, ReceiptError> {
    let mut c = Composer::new(page, config.overflow);
    let (left, right) = (c.left(), c.right());
    let width = right - left;

    // Header
    c.elements.push(PositionedElement::image(logo_anchor(), LOGO_RESOURCE));
    let header_x = left + LOGO_SIZE + GAP;
    let header_width = right - header_x;
    let institution = &config.institution;
    c.text("institution name", header_x, MARGIN + 4.0, &institution.name, StandardFont::HelveticaBold, 14.0, INK, header_width)?;
    for (i, line) in institution.address.iter().take(2).enumerate() {
        let y = MARGIN + 24.0 + i as f32 * 12.0;
        c.text("institution address", header_x, y, line, StandardFont::Helvetica, 9.0, MUTED, header_width)?;
    }

    let mut y = MARGIN + LOGO_SIZE + 10.0;
    c.rule(y, INK, 1.0);
    y += GAP;

    // The title keeps its full width; the receipt number shrinks into the rest.
    let title_width = StandardFont::HelveticaBold.text_width(variant.title, 12.0);
    let id_text = format!("Receipt No: {}", record.id.trim());
    let id_width = c.pinned_right("receipt id", right, y, &id_text, StandardFont::HelveticaBold, 9.0, width - title_width - GAP)?;
    c.text("title", left, y, variant.title, StandardFont::HelveticaBold, 12.0, INK, width - id_width - GAP)?;
    let date_text = format!("Date: {}", record.date.format("%d %b %Y"));
    c.text_right("date", right, y + 14.0, &date_text, StandardFont::Helvetica, 9.0, MUTED, width)?;
    y += 30.0;

    // Payer and kind-specific details
    c.label_value("payer", y, "Received from", record.payer.trim(), StandardFont::HelveticaBold, 10.0)?;
    y += ROW_HEIGHT;
    for (label, value) in &variant.details {
        c.label_value(label, y, label, value, StandardFont::Helvetica, 9.0)?;
        y += ROW_HEIGHT;
    }
    y += 6.0;

    // The footer block is anchored to the bottom margin.
    let footer = institution.footer.as_deref().map(str::trim).filter(|f| !f.is_empty());
    let bottom_top = page.height
        - MARGIN
        - footer.map_or(0.0, |_| FOOTER_BLOCK)
        - variant.notes.map_or(0.0, |_| ROW_HEIGHT)
        - variant.summary.len() as f32 * ROW_HEIGHT
        - TOTAL_BLOCK;
    let items_bottom = bottom_top - 8.0;
    if y + ROW_HEIGHT > items_bottom {
        return Err(ReceiptError::LayoutOverflow(format!(
            "page is too short: body ends at {:.1}pt but the totals start at {:.1}pt",
            y + ROW_HEIGHT,
            bottom_top
        )));
    }

    // Line items
    let amount_header = if config.currency_in_rows {
        "Amount".to_string()
    } else {
        format!("Amount ({})", record.currency.trim())
    };
    c.elements.push(PositionedElement::fill(Rect::new(left, y, width, ROW_HEIGHT), BAND));
    c.text("items header", left + ROW_INSET, y + ROW_INSET, "Description", StandardFont::HelveticaBold, 9.0, INK, width - AMOUNT_COLUMN)?;
    c.text_right("items header", right - ROW_INSET, y + ROW_INSET, &amount_header, StandardFont::HelveticaBold, 9.0, INK, AMOUNT_COLUMN)?;
    y += ROW_HEIGHT;

    let capacity = ((items_bottom - y) / ROW_HEIGHT).floor() as usize;
    let (shown, hidden) = c.split_items(record.items.len(), capacity)?;
    let amount_text = |amount: Decimal| {
        if config.currency_in_rows {
            format_total(amount, &record.currency)
        } else {
            format_amount(amount)
        }
    };
    for item in &record.items[..shown] {
        let label_width = width - AMOUNT_COLUMN - 2.0 * ROW_INSET;
        c.text("line item", left + ROW_INSET, y + ROW_INSET, item.label.trim(), StandardFont::Helvetica, 9.0, INK, label_width)?;
        c.text_right("line item amount", right - ROW_INSET, y + ROW_INSET, &amount_text(item.amount), StandardFont::Helvetica, 9.0, INK, AMOUNT_COLUMN)?;
        c.rule(y + ROW_HEIGHT, RULE, 0.5);
        y += ROW_HEIGHT;
    }
    if hidden > 0 {
        let more = format!("... {} more item(s)", hidden);
        c.text("hidden items", left + ROW_INSET, y + ROW_INSET, &more, StandardFont::Helvetica, 9.0, MUTED, width)?;
    }

    // Total, summary, notes, footer
    let mut y = bottom_top;
    c.rule(y, INK, 1.0);
    y += 6.0;
    let total_label_width = c.text("total", left, y, "Total", StandardFont::HelveticaBold, 11.0, INK, width)?;
    let total_text = format_total(record.amount, &record.currency);
    c.pinned_right("total", right, y, &total_text, StandardFont::HelveticaBold, 11.0, width - total_label_width - GAP)?;
    y = bottom_top + TOTAL_BLOCK;

    for (label, amount) in &variant.summary {
        c.text(label, left, y + ROW_INSET, label, StandardFont::Helvetica, 9.0, MUTED, width - AMOUNT_COLUMN)?;
        c.text_right(label, right, y + ROW_INSET, &amount_text(*amount), StandardFont::Helvetica, 9.0, INK, AMOUNT_COLUMN)?;
        y += ROW_HEIGHT;
    }
    if let Some(notes) = variant.notes {
        c.text("notes", left, y + ROW_INSET, &format!("Note: {}", notes), StandardFont::Helvetica, 8.0, MUTED, width)?;
    }
    if let Some(footer) = footer {
        c.text("footer", left, page.height - MARGIN - 8.0, footer, StandardFont::Helvetica, 8.0, MUTED, width)?;
    }

    c.truncation.hidden_items = hidden;
    Ok(c.finish())
}

/// Collects elements and keeps track of what the overflow policy cut.
struct Composer {
    page: Size,
    policy: OverflowPolicy,
    elements: Vec<PositionedElement>,
    truncation: Truncation,
}

impl Composer {
    fn new(page: Size, policy: OverflowPolicy) -> Self {
        Self {
            page,
            policy,
            elements: Vec::new(),
            truncation: Truncation::default(),
        }
    }

    fn left(&self) -> f32 {
        MARGIN
    }

    fn right(&self) -> f32 {
        self.page.width - MARGIN
    }

    fn finish(self) -> Composition {
        let truncation = (!self.truncation.is_empty()).then_some(self.truncation);
        Composition {
            elements: self.elements,
            truncation,
        }
    }

    /// Places left-aligned text, cut to `max_width`. Returns the width used.
    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        field: &str,
        x: f32,
        y: f32,
        text: &str,
        font: StandardFont,
        size: f32,
        color: Color,
        max_width: f32,
    ) -> Result<f32, ReceiptError> {
        let fitted = font.fit(text, size, max_width.max(0.0));
        self.check_loss(field, &fitted)?;
        let element = PositionedElement::text(x, y, fitted.text, font, size, color);
        let width = element.rect.width;
        self.elements.push(element);
        Ok(width)
    }

    /// Places text ending at `right`, cut to `max_width`.
    #[allow(clippy::too_many_arguments)]
    fn text_right(
        &mut self,
        field: &str,
        right: f32,
        y: f32,
        text: &str,
        font: StandardFont,
        size: f32,
        color: Color,
        max_width: f32,
    ) -> Result<f32, ReceiptError> {
        let fitted = font.fit(text, size, max_width.max(0.0));
        self.check_loss(field, &fitted)?;
        let width = font.text_width(&fitted.text, size);
        self.elements
            .push(PositionedElement::text(right - width, y, fitted.text, font, size, color));
        Ok(width)
    }

    /// Places right-aligned text that must appear in full, shrinking it if needed.
    #[allow(clippy::too_many_arguments)]
    fn pinned_right(
        &mut self,
        field: &str,
        right: f32,
        y: f32,
        text: &str,
        font: StandardFont,
        size: f32,
        max_width: f32,
    ) -> Result<f32, ReceiptError> {
        if let Some(bad) = unencodable(text).next() {
            return Err(ReceiptError::LayoutOverflow(format!(
                "{} '{}' contains {:?}, which the standard fonts cannot print",
                field, text, bad
            )));
        }
        let mut size = size;
        loop {
            let width = font.text_width(text, size);
            if width <= max_width {
                self.elements
                    .push(PositionedElement::text(right - width, y, text, font, size, INK));
                return Ok(width);
            }
            if size <= MIN_PINNED_SIZE {
                return Err(ReceiptError::LayoutOverflow(format!(
                    "{} '{}' needs {:.1}pt but only {:.1}pt are available",
                    field, text, width, max_width
                )));
            }
            size = (size - 0.5).max(MIN_PINNED_SIZE);
        }
    }

    fn label_value(
        &mut self,
        field: &str,
        y: f32,
        label: &str,
        value: &str,
        font: StandardFont,
        size: f32,
    ) -> Result<(), ReceiptError> {
        let (left, right) = (self.left(), self.right());
        self.text(field, left, y + ROW_INSET, &format!("{}:", label), StandardFont::Helvetica, 9.0, MUTED, LABEL_COLUMN - 6.0)?;
        self.text(field, left + LABEL_COLUMN, y + ROW_INSET, value, font, size, INK, right - left - LABEL_COLUMN)?;
        Ok(())
    }

    fn rule(&mut self, y: f32, color: Color, thickness: f32) {
        let (left, right) = (self.left(), self.right());
        self.elements
            .push(PositionedElement::rule(left, y, right - left, thickness, color));
    }

    /// How many of `count` items to print and how many to summarize as hidden.
    fn split_items(&self, count: usize, capacity: usize) -> Result<(usize, usize), ReceiptError> {
        if count <= capacity {
            return Ok((count, 0));
        }
        if capacity == 0 {
            return Err(ReceiptError::LayoutOverflow(format!(
                "no room for any of the {} line items",
                count
            )));
        }
        match self.policy {
            OverflowPolicy::Reject => Err(ReceiptError::LayoutOverflow(format!(
                "{} line items exceed the {} rows available",
                count, capacity
            ))),
            // One row goes to the "more items" marker.
            OverflowPolicy::Clip => {
                let shown = capacity.saturating_sub(1);
                Ok((shown, count - shown))
            }
        }
    }

    /// Records a clipped or substituted field, or fails under `Reject`.
    fn check_loss(&mut self, field: &str, fitted: &FittedText) -> Result<(), ReceiptError> {
        let problem = if fitted.substituted {
            "has characters the standard fonts cannot print"
        } else if fitted.clipped {
            "does not fit its column"
        } else {
            return Ok(());
        };
        match self.policy {
            OverflowPolicy::Clip => {
                self.truncation.clipped_fields.push(field.to_string());
                Ok(())
            }
            OverflowPolicy::Reject => Err(ReceiptError::LayoutOverflow(format!("{} {}", field, problem))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageSize;
    use chrono::NaiveDate;
    use quittance_render_lopdf::Element;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn jane_doe() -> ReceiptRecord {
        ReceiptRecord::new(
            "R-001",
            "Jane Doe",
            d("1500.00"),
            "INR",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
        .with_item("Tuition", d("1500.00"))
    }

    fn compose_with(record: &ReceiptRecord, config: &ReceiptConfig) -> Result<Composition, ReceiptError> {
        let variant = VariantContent::for_record(record);
        compose(record, &variant, config, config.page.dimensions())
    }

    fn texts(composition: &Composition) -> Vec<&str> {
        composition.elements.iter().filter_map(|el| el.as_text()).collect()
    }

    fn with_items(count: usize) -> ReceiptRecord {
        (0..count).fold(jane_doe(), |record, i| record.with_item(format!("Item {}", i), d("1")))
    }

    #[test]
    fn test_logo_is_placed_at_fixed_anchor() {
        let composition = compose_with(&jane_doe(), &ReceiptConfig::default()).unwrap();
        let logo = composition
            .elements
            .iter()
            .find(|el| matches!(el.element, Element::Image { .. }))
            .unwrap();
        assert_eq!(logo.rect, Rect::new(36.0, 36.0, 56.0, 56.0));
    }

    #[test]
    fn test_basic_content() {
        let composition = compose_with(&jane_doe(), &ReceiptConfig::default()).unwrap();
        let texts = texts(&composition);

        for expected in ["FEE RECEIPT", "Receipt No: R-001", "Date: 10 Jan 2024", "Jane Doe", "Tuition", "1500.00", "INR 1500.00"] {
            assert!(texts.contains(&expected), "missing {:?} in {:?}", expected, texts);
        }
        assert!(composition.truncation.is_none());
    }

    #[test]
    fn test_amounts_are_right_aligned() {
        let composition = compose_with(&jane_doe(), &ReceiptConfig::default()).unwrap();
        let right = 420.0 - MARGIN;
        for amount in ["INR 1500.00", "Receipt No: R-001"] {
            let el = composition
                .elements
                .iter()
                .find(|el| el.as_text() == Some(amount))
                .unwrap();
            assert!((el.rect.right() - right).abs() < 0.01, "{} ends at {}", amount, el.rect.right());
        }
    }

    #[test]
    fn test_clip_hides_overflowing_items() {
        let composition = compose_with(&with_items(60), &ReceiptConfig::default()).unwrap();
        let truncation = composition.truncation.clone().unwrap();
        let texts = texts(&composition);

        assert!(truncation.hidden_items > 0);
        let marker = format!("... {} more item(s)", truncation.hidden_items);
        assert!(texts.contains(&marker.as_str()), "{:?}", texts);
        // 60 items plus the original one; shown + hidden accounts for all of them.
        let shown = texts.iter().filter(|t| t.starts_with("Item ") || **t == "Tuition").count();
        assert_eq!(shown + truncation.hidden_items, 61);
        assert!(texts.contains(&"INR 1500.00"));
        assert!(texts.contains(&"Receipt No: R-001"));
    }

    #[test]
    fn test_reject_fails_on_overflowing_items() {
        let config = ReceiptConfig {
            overflow: OverflowPolicy::Reject,
            ..Default::default()
        };
        assert!(matches!(
            compose_with(&with_items(60), &config),
            Err(ReceiptError::LayoutOverflow(_))
        ));
        assert!(compose_with(&with_items(3), &config).is_ok());
    }

    #[test]
    fn test_long_payer_is_clipped_or_rejected() {
        let mut record = jane_doe();
        record.payer = "Jane ".repeat(40);

        let clipped = compose_with(&record, &ReceiptConfig::default()).unwrap();
        assert_eq!(clipped.truncation.unwrap().clipped_fields, vec!["payer".to_string()]);

        let config = ReceiptConfig {
            overflow: OverflowPolicy::Reject,
            ..Default::default()
        };
        assert!(matches!(compose_with(&record, &config), Err(ReceiptError::LayoutOverflow(_))));
    }

    #[test]
    fn test_long_receipt_id_shrinks_instead_of_clipping() {
        let mut record = jane_doe();
        record.id = "RCP-20240110-9F2C41AB-DUPLICATE-COPY-0001".into();
        let composition = compose_with(&record, &ReceiptConfig::default()).unwrap();

        let id = format!("Receipt No: {}", record.id);
        assert!(texts(&composition).contains(&id.as_str()));
    }

    #[test]
    fn test_unfittable_total_is_an_error() {
        let mut record = jane_doe();
        record.amount = d("1".repeat(28).as_str());
        record.currency = "X".repeat(40);
        let config = ReceiptConfig {
            page: PageSize::Custom { width: 300.0, height: 595.0 },
            ..Default::default()
        };
        assert!(matches!(compose_with(&record, &config), Err(ReceiptError::LayoutOverflow(_))));
    }

    fn reject() -> ReceiptConfig {
        ReceiptConfig {
            overflow: OverflowPolicy::Reject,
            ..Default::default()
        }
    }

    fn overflow_message(result: Result<Composition, ReceiptError>) -> String {
        match result {
            Err(ReceiptError::LayoutOverflow(message)) => message,
            other => panic!("expected LayoutOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_long_receipt_id_leaves_the_title_intact() {
        let mut record = jane_doe();
        record.id = "RCP-20240110-9F2C41AB-DUPLICATE-COPY-0001".into();
        let composition = compose_with(&record, &reject()).unwrap();
        assert!(texts(&composition).contains(&"FEE RECEIPT"));

        record.id = "X".repeat(60);
        assert!(overflow_message(compose_with(&record, &reject())).starts_with("receipt id"));
    }

    #[test]
    fn test_unprintable_receipt_id_is_an_error() {
        let mut record = jane_doe();
        record.id = "R-\u{0967}\u{0968}\u{0969}".into();
        for config in [ReceiptConfig::default(), reject()] {
            assert!(overflow_message(compose_with(&record, &config)).starts_with("receipt id"));
        }
    }

    #[test]
    fn test_unprintable_payer_is_reported() {
        let mut record = jane_doe();
        record.payer = "\u{091C}\u{0947}\u{0928} Doe".into();

        let composition = compose_with(&record, &ReceiptConfig::default()).unwrap();
        assert_eq!(composition.truncation.unwrap().clipped_fields, vec!["payer".to_string()]);
        assert!(overflow_message(compose_with(&record, &reject())).contains("cannot print"));
    }

    #[test]
    fn test_no_item_rows_left_is_an_error() {
        // 270pt leaves room for the items header but not for a single row.
        let config = ReceiptConfig {
            page: PageSize::Custom { width: 420.0, height: 270.0 },
            ..Default::default()
        };
        assert!(overflow_message(compose_with(&jane_doe(), &config)).contains("no room"));

        let empty = ReceiptRecord::new("R-0", "Jane Doe", Decimal::ZERO, "INR", NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(compose_with(&empty, &config).is_ok());
    }

    #[test]
    fn test_single_row_holds_the_marker() {
        let config = ReceiptConfig {
            page: PageSize::Custom { width: 420.0, height: 280.0 },
            ..Default::default()
        };
        let composition = compose_with(&with_items(1), &config).unwrap();
        let texts = texts(&composition);

        assert!(texts.contains(&"... 2 more item(s)"), "{:?}", texts);
        assert!(!texts.contains(&"Tuition"));
        assert_eq!(composition.truncation.unwrap().hidden_items, 2);
    }

    #[test]
    fn test_empty_items_still_has_total() {
        let record = ReceiptRecord::new("R-0", "Jane Doe", Decimal::ZERO, "INR", NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let composition = compose_with(&record, &ReceiptConfig::default()).unwrap();
        assert!(texts(&composition).contains(&"INR 0.00"));
    }

    #[test]
    fn test_currency_in_rows() {
        let config = ReceiptConfig {
            currency_in_rows: true,
            ..Default::default()
        };
        let composition = compose_with(&jane_doe(), &config).unwrap();
        let texts = texts(&composition);
        assert!(texts.contains(&"Amount"));
        assert_eq!(texts.iter().filter(|t| **t == "INR 1500.00").count(), 2);
    }

    #[test]
    fn test_short_page_is_an_error() {
        let config = ReceiptConfig {
            page: PageSize::Custom { width: 420.0, height: 200.0 },
            ..Default::default()
        };
        assert!(matches!(compose_with(&jane_doe(), &config), Err(ReceiptError::LayoutOverflow(_))));
    }
}
