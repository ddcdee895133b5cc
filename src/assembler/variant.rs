use quittance_types::{ReceiptKind, ReceiptRecord};
use rust_decimal::Decimal;

/// The parts of a receipt that depend on its kind. Everything else,
/// including the logo, is laid out the same way for every kind.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VariantContent<'a> {
    pub title: &'static str,
    pub subject: &'static str,
    /// Label/value rows printed under the payer.
    pub details: Vec<(&'static str, &'a str)>,
    /// Label/amount rows printed under the total.
    pub summary: Vec<(&'static str, Decimal)>,
    pub notes: Option<&'a str>,
}

impl<'a> VariantContent<'a> {
    pub fn for_record(record: &'a ReceiptRecord) -> Self {
        match &record.kind {
            ReceiptKind::General => Self {
                title: "FEE RECEIPT",
                subject: "Fee receipt",
                details: Vec::new(),
                summary: Vec::new(),
                notes: None,
            },
            ReceiptKind::Payment(payment) => {
                let mut details = vec![("Payment method", payment.method.trim())];
                let optional = [
                    ("Fee type", &payment.fee_type),
                    ("Account ref", &payment.reference),
                    ("Received by", &payment.received_by),
                ];
                details.extend(
                    optional
                        .into_iter()
                        .filter_map(|(label, value)| non_blank(value).map(|v| (label, v))),
                );

                let summary = payment
                    .account
                    .map(|account| {
                        vec![
                            ("Total fee", account.total_fee),
                            ("Discount", account.discount),
                            ("Paid to date", account.paid_to_date),
                            ("Balance due", account.balance),
                        ]
                    })
                    .unwrap_or_default();

                Self {
                    title: "PAYMENT RECEIPT",
                    subject: "Payment receipt",
                    details,
                    summary,
                    notes: non_blank(&payment.notes),
                }
            }
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quittance_types::{AccountSummary, PaymentDetails};

    fn record(kind: ReceiptKind) -> ReceiptRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        ReceiptRecord::new("R-001", "Jane Doe", Decimal::new(150000, 2), "INR", date).with_kind(kind)
    }

    #[test]
    fn test_general_has_no_extra_rows() {
        let record = record(ReceiptKind::General);
        let variant = VariantContent::for_record(&record);
        assert_eq!(variant.title, "FEE RECEIPT");
        assert!(variant.details.is_empty());
        assert!(variant.summary.is_empty());
        assert!(variant.notes.is_none());
    }

    #[test]
    fn test_payment_rows_skip_blank_fields() {
        let record = record(ReceiptKind::Payment(PaymentDetails {
            method: " UPI ".into(),
            fee_type: Some("Tuition".into()),
            reference: Some("   ".into()),
            received_by: Some("admin".into()),
            notes: Some("First installment".into()),
            account: Some(AccountSummary {
                total_fee: Decimal::new(5000, 0),
                discount: Decimal::ZERO,
                paid_to_date: Decimal::new(1500, 0),
                balance: Decimal::new(3500, 0),
            }),
        }));
        let variant = VariantContent::for_record(&record);

        assert_eq!(variant.title, "PAYMENT RECEIPT");
        assert_eq!(
            variant.details,
            vec![("Payment method", "UPI"), ("Fee type", "Tuition"), ("Received by", "admin")]
        );
        assert_eq!(variant.summary.len(), 4);
        assert_eq!(variant.summary[3], ("Balance due", Decimal::new(3500, 0)));
        assert_eq!(variant.notes, Some("First installment"));
    }
}
