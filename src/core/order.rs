//! Import of order records from the order-storage collaborator.
//!
//! The collaborator's JSON is camelCase and sparsely populated: any field
//! may be missing. Numeric gaps normalize to zero and textual gaps stay
//! `None` (rendered as "N/A"), so downstream layout never panics on an
//! incomplete record. Only a completely unidentifiable order is fatal.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::billing::{compute_summary, reconcile};
use super::error::BillError;
use super::types::{BillingSummary, Customer, InvoiceDocument, InvoiceNumber, LineItem, Vendor};
use super::words::amount_in_words;

/// An order as stored by the order-storage collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderRecord {
    /// Internal storage id (e.g. a hex object id).
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    /// Human-facing order number.
    pub order_number: Option<String>,
    /// Compliance invoice number, present once an invoice series issued one.
    pub invoice_number: Option<String>,
    pub items: Vec<OrderItem>,
    pub billing_details: Option<BillingDetails>,
    pub delivery_address: Option<DeliveryAddress>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub order_status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub coupon_code: Option<String>,
    pub coupon_amount: Option<Decimal>,
}

/// A stored order line. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    pub product_name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
    pub gst_percentage: Option<Decimal>,
    pub gst_amount: Option<Decimal>,
    pub total: Option<Decimal>,
}

/// Aggregate totals persisted with the order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingDetails {
    pub cart_total: Option<Decimal>,
    pub gst_amount: Option<Decimal>,
    pub shipping_charges: Option<Decimal>,
    pub total_amount: Option<Decimal>,
}

/// Shipping address, doubling as the bill-to block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryAddress {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
}

impl DeliveryAddress {
    /// Single-line rendering, skipping missing parts.
    pub fn display(&self) -> String {
        let parts: Vec<&str> = [
            self.street.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.pincode.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
        if parts.is_empty() {
            "N/A".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl OrderRecord {
    /// Resolve the invoice identifier for this order.
    ///
    /// A stored compliance invoice number wins; otherwise the order number
    /// or internal id derives a fallback label. An order with none of the
    /// three cannot be invoiced at all.
    pub fn resolve_invoice_number(&self) -> Result<InvoiceNumber, BillError> {
        if let Some(n) = non_empty(self.invoice_number.as_deref()) {
            return Ok(InvoiceNumber::Sequenced(n.to_string()));
        }
        if let Some(reference) = non_empty(self.order_number.as_deref())
            .or_else(|| non_empty(self.id.as_deref()))
        {
            return Ok(InvoiceNumber::FromOrder(format_order_id(reference)));
        }
        Err(BillError::MissingOrderIdentifier)
    }

    /// The reference printed in the invoice metadata table.
    pub fn order_reference(&self) -> Option<&str> {
        non_empty(self.order_number.as_deref()).or_else(|| non_empty(self.id.as_deref()))
    }

    /// Line items with numeric gaps normalized to zero.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .map(|item| LineItem {
                name: item
                    .product_name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "N/A".to_string()),
                unit_price: item.price.unwrap_or(Decimal::ZERO),
                quantity: item.quantity.unwrap_or(0),
                tax_rate: item.gst_percentage.unwrap_or(Decimal::ZERO),
                subtotal: None,
                tax_amount: item.gst_amount,
            })
            .collect()
    }
}

impl InvoiceDocument {
    /// Build a tax invoice from a stored order and the vendor's profile.
    ///
    /// Totals are recomputed from the line items; when the order carries
    /// stored aggregates they are reconciled against the recomputation and
    /// kept authoritative on mismatch (logged, never auto-corrected). The
    /// CGST/SGST split is always recomputed — the collaborator persists
    /// only aggregates.
    ///
    /// # Errors
    ///
    /// [`BillError::MissingOrderIdentifier`] when the order has no invoice
    /// number, order number, or internal id; [`BillError::InvalidOrder`]
    /// when it has no line items.
    pub fn from_order(
        order: &OrderRecord,
        vendor: Vendor,
        issue_date: NaiveDate,
    ) -> Result<Self, BillError> {
        let invoice_number = order.resolve_invoice_number()?;
        let lines = order.line_items();

        let shipping = order
            .billing_details
            .as_ref()
            .and_then(|b| b.shipping_charges)
            .unwrap_or(Decimal::ZERO);
        let coupon = order.coupon_amount.unwrap_or(Decimal::ZERO);

        let recomputed = compute_summary(&lines, shipping, coupon)?;
        let summary = match &order.billing_details {
            Some(stored) => {
                let stored_summary = BillingSummary {
                    subtotal: stored.cart_total.unwrap_or(recomputed.subtotal),
                    tax_total: stored.gst_amount.unwrap_or(recomputed.tax_total),
                    tax_split: recomputed.tax_split.clone(),
                    shipping_charge: shipping,
                    coupon_discount: coupon,
                    grand_total: stored.total_amount.unwrap_or(recomputed.grand_total),
                };
                // Diagnostic only; the stored ledger wins.
                let _ = reconcile(&stored_summary, &recomputed);
                stored_summary
            }
            None => recomputed,
        };

        let customer = match &order.delivery_address {
            Some(addr) => Customer {
                name: addr
                    .name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "N/A".to_string()),
                address: addr.display(),
                gstin: None,
            },
            None => Customer {
                name: "N/A".to_string(),
                address: "N/A".to_string(),
                gstin: None,
            },
        };

        let amount_in_words = amount_in_words(summary.grand_total);

        Ok(InvoiceDocument {
            invoice_number,
            issue_date,
            order_date: order.created_at.map(|dt| dt.date_naive()),
            order_reference: order
                .order_reference()
                .map(str::to_string)
                .unwrap_or_else(|| "N/A".to_string()),
            order_status: order.order_status.clone(),
            payment_mode: order.payment_method.clone(),
            payment_status: order.payment_status.clone(),
            vendor,
            customer,
            lines,
            summary,
            amount_in_words,
            coupon_code: order.coupon_code.clone(),
        })
    }
}

/// Fallback invoice label from an order identifier: the last 8 characters,
/// uppercased (storage ids are long hex strings).
fn format_order_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    let tail = if chars.len() > 8 {
        &chars[chars.len() - 8..]
    } else {
        &chars[..]
    };
    tail.iter().collect::<String>().to_uppercase()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
