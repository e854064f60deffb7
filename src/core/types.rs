use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::billing::round_half_up;

/// A single billable order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Display label, presentation order is preserved.
    pub name: String,
    /// Net price per unit.
    pub unit_price: Decimal,
    /// Ordered quantity. Zero is legal and contributes nothing.
    pub quantity: u32,
    /// GST rate in percent (e.g. 5, 12, 18).
    pub tax_rate: Decimal,
    /// Stored net amount, if the order record carried one.
    /// When absent it is derived as `unit_price * quantity`.
    pub subtotal: Option<Decimal>,
    /// Stored GST amount, if the order record carried one.
    pub tax_amount: Option<Decimal>,
}

impl LineItem {
    /// Net amount for this line: the stored value when present,
    /// otherwise `unit_price * quantity`.
    pub fn net_amount(&self) -> Decimal {
        self.subtotal
            .unwrap_or_else(|| self.unit_price * Decimal::from(self.quantity))
    }

    /// GST amount for this line, rounded half-up to 2 decimal places.
    pub fn tax(&self) -> Decimal {
        let raw = self
            .tax_amount
            .unwrap_or_else(|| self.net_amount() * self.tax_rate / dec!(100));
        round_half_up(raw, 2)
    }

    /// Gross line total (net + GST).
    pub fn total(&self) -> Decimal {
        self.net_amount() + self.tax()
    }
}

/// One distinct GST rate present on the invoice.
///
/// Intra-state GST splits 50/50 between the central and state authority,
/// so each group renders as two co-tax lines (CGST + SGST) at `half_rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxGroup {
    /// Full GST rate in percent.
    pub rate: Decimal,
    /// Half the rate — the CGST (and SGST) rate shown on the invoice.
    pub half_rate: Decimal,
    /// Half the group's tax amount, rounded to 2 decimal places.
    pub half_amount: Decimal,
}

/// Computed billing totals. Immutable once an invoice is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSummary {
    /// Sum of all line net amounts.
    pub subtotal: Decimal,
    /// Sum of all line GST amounts.
    pub tax_total: Decimal,
    /// Per-rate CGST/SGST groups, ascending by rate. Zero-rate lines
    /// never produce a group.
    pub tax_split: Vec<TaxGroup>,
    /// Delivery charge; zero means free shipping.
    pub shipping_charge: Decimal,
    /// Coupon discount applied at order level.
    pub coupon_discount: Decimal,
    /// `subtotal + tax_total + shipping_charge - coupon_discount`,
    /// clamped at zero.
    pub grand_total: Decimal,
}

/// Invoice identifier: a compliance-sequenced number when one was issued,
/// otherwise a label derived from the order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceNumber {
    /// Number from the vendor's consecutive invoice series (preferred).
    Sequenced(String),
    /// Fallback derived from the order identifier.
    FromOrder(String),
}

impl InvoiceNumber {
    /// The label printed on the invoice.
    pub fn label(&self) -> &str {
        match self {
            Self::Sequenced(n) => n,
            Self::FromOrder(id) => id,
        }
    }

    /// Download filename: `<number>.pdf` for sequenced invoices,
    /// `Invoice-<orderId>.pdf` for the fallback.
    pub fn filename(&self) -> String {
        match self {
            Self::Sequenced(n) => format!("{}.pdf", n.replace('/', "-")),
            Self::FromOrder(id) => format!("Invoice-{id}.pdf"),
        }
    }
}

/// The selling vendor as printed on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub business_name: String,
    /// 15-character GSTIN.
    pub gstin: String,
    /// State of registration (place of supply for intra-state orders).
    pub state: String,
    /// Settlement account details for the payment block.
    pub bank: Option<BankDetails>,
}

/// Vendor settlement account, rendered in the payment block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: String,
    pub branch: String,
    pub ifsc: String,
    pub account_holder: String,
    pub account_number: String,
    /// UPI virtual payment address, used to build the payment QR.
    pub upi_id: String,
}

/// The buyer (bill-to block).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub address: String,
    /// Buyer GSTIN for B2B orders, when known.
    pub gstin: Option<String>,
}

/// A fully resolved tax invoice, ready for document assembly.
///
/// Created on demand at download time; this crate never persists it.
/// Metadata that the order record may lack is `Option` and renders
/// as `"N/A"` — assembly never fails on incomplete metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub invoice_number: InvoiceNumber,
    pub issue_date: NaiveDate,
    pub order_date: Option<NaiveDate>,
    /// Human-facing order reference (order number or internal id).
    pub order_reference: String,
    pub order_status: Option<String>,
    pub payment_mode: Option<String>,
    pub payment_status: Option<String>,
    pub vendor: Vendor,
    pub customer: Customer,
    /// Presentation order, never reordered.
    pub lines: Vec<LineItem>,
    pub summary: BillingSummary,
    /// Grand total in words, Indian grouping.
    pub amount_in_words: String,
    pub coupon_code: Option<String>,
}
