//! # gstbill
//!
//! Indian GST billing and tax-invoice generation for marketplace orders:
//! CGST/SGST breakdown, amount-in-words (Indian grouping), paginated PDF
//! invoices, and UPI payment QR codes.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Intra-state GST is split 50/50 into CGST and SGST per rate group.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gstbill::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .invoice_number("RB/24-25/0001")
//!     .order_reference("ORD-88112")
//!     .vendor(VendorBuilder::new("Packwell Traders", "27AAPFU0939F1ZV", "Maharashtra").build())
//!     .customer(CustomerBuilder::new("Cafe Nirvana", "12 MG Road, Pune 411001").build())
//!     .add_line(LineItemBuilder::new("Kraft paper box 750ml", dec!(12.50), 200).gst(dec!(18)).build())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.summary.subtotal, dec!(2500.00));
//! assert_eq!(invoice.summary.tax_total, dec!(450.00));
//! assert_eq!(invoice.summary.grand_total, dec!(2950.00));
//! assert_eq!(
//!     invoice.amount_in_words,
//!     "Two Thousand Nine Hundred Fifty Rupees Only"
//! );
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Billing engine, order import, amount-in-words, numbering |
//! | `pdf` | Paginated tax-invoice PDF assembly |
//! | `qr` | UPI payment URI + QR image fetch |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "qr")]
pub mod qr;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

/// Assemble an invoice PDF, fetching the UPI payment QR best-effort first.
///
/// The QR fetch hits an external rendering service and is treated as a
/// degraded-path asset: on timeout or error the invoice is still produced,
/// just without the QR image.
#[cfg(all(feature = "pdf", feature = "qr"))]
pub async fn render_invoice(invoice: &core::InvoiceDocument) -> Result<Vec<u8>, core::BillError> {
    let qr_png = match invoice.vendor.bank.as_ref().map(|b| b.upi_id.as_str()) {
        Some(upi) if !upi.is_empty() => {
            qr::fetch_payment_qr(
                upi,
                &invoice.vendor.business_name,
                invoice.summary.grand_total,
                invoice.invoice_number.label(),
            )
            .await
        }
        _ => None,
    };
    pdf::assemble(invoice, qr_png.as_deref())
}
