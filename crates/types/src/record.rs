//! Receipt records as handed over by the surrounding application.
//!
//! Records are already resolved: names, amounts and dates arrive as final
//! values and are printed as given. Nothing here recomputes totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One transaction to be printed as a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Unique identifier of the issued receipt, e.g. `RCP-20240110-9F2C41AB`.
    pub id: String,
    pub payer: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub kind: ReceiptKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Selects the receipt variant. Both variants share one layout; the kind only
/// contributes its title and its own rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReceiptKind {
    /// A plain fee receipt.
    #[default]
    General,
    /// A receipt for a recorded payment.
    Payment(PaymentDetails),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// How the money was received: cash, UPI, card, cheque...
    pub method: String,
    #[serde(default)]
    pub fee_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Staff member who recorded the payment.
    #[serde(default)]
    pub received_by: Option<String>,
    /// Payer's account reference, e.g. a student id.
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub account: Option<AccountSummary>,
}

/// Account standing printed under a payment. Values are printed verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub total_fee: Decimal,
    pub discount: Decimal,
    pub paid_to_date: Decimal,
    pub balance: Decimal,
}

impl ReceiptRecord {
    pub fn new(
        id: impl Into<String>,
        payer: impl Into<String>,
        amount: Decimal,
        currency: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            payer: payer.into(),
            amount,
            currency: currency.into(),
            date,
            items: Vec::new(),
            kind: ReceiptKind::General,
        }
    }

    pub fn with_item(mut self, label: impl Into<String>, amount: Decimal) -> Self {
        self.items.push(LineItem::new(label, amount));
        self
    }

    pub fn with_kind(mut self, kind: ReceiptKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn payment_details(&self) -> Option<&PaymentDetails> {
        match &self.kind {
            ReceiptKind::Payment(details) => Some(details),
            ReceiptKind::General => None,
        }
    }
}
