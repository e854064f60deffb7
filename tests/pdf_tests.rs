//! Document assembly tests. The produced bytes are reloaded with lopdf
//! to assert on structure rather than on raw byte offsets.

#![cfg(feature = "pdf")]

use chrono::NaiveDate;
use gstbill::core::*;
use gstbill::pdf::assemble;
use lopdf::Document;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn vendor() -> Vendor {
    VendorBuilder::new("Packwell Traders", "27AAPFU0939F1ZV", "Maharashtra")
        .bank(BankDetails {
            bank_name: "HDFC Bank".into(),
            branch: "Deccan Gymkhana".into(),
            ifsc: "HDFC0000123".into(),
            account_holder: "Packwell Traders".into(),
            account_number: "50100212345678".into(),
            upi_id: "packwell@ybl".into(),
        })
        .build()
}

fn small_invoice() -> InvoiceDocument {
    InvoiceBuilder::new(date(2024, 6, 15))
        .invoice_number("RB/24-25/0042")
        .order_reference("ORD-2024-1187")
        .order_date(date(2024, 6, 10))
        .payment_mode("UPI")
        .payment_status("Paid")
        .order_status("Delivered")
        .vendor(vendor())
        .customer(CustomerBuilder::new("Cafe Nirvana", "12 MG Road, Pune 411001").build())
        .add_line(LineItemBuilder::new("Kraft paper box 750ml", dec!(12.50), 200).gst(dec!(18)).build())
        .add_line(LineItemBuilder::new("Dumpling container 500ml", dec!(25.00), 3).gst(dec!(5)).build())
        .shipping(dec!(60))
        .build()
        .unwrap()
}

fn big_invoice(lines: usize) -> InvoiceDocument {
    let mut builder = InvoiceBuilder::new(date(2024, 6, 15))
        .order_reference("ORD-BULK-1")
        .vendor(vendor())
        .customer(CustomerBuilder::new("Hotel Blue Orchid", "Plot 4, Baner, Pune").build());
    for i in 1..=lines {
        builder = builder.add_line(
            LineItemBuilder::new(format!("Catering supply item {i}"), dec!(9.90), 10)
                .gst(dec!(12))
                .build(),
        );
    }
    builder.build().unwrap()
}

#[test]
fn small_invoice_fits_one_page() {
    let bytes = assemble(&small_invoice(), None).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);

    let text = doc.extract_text(&[1]).unwrap();
    assert!(text.contains("TAX INVOICE"));
    assert!(text.contains("Packwell Traders"));
    assert!(text.contains("RB/24-25/0042"));
    assert!(text.contains("CGST @ 9%"));
    assert!(text.contains("SGST @ 9%"));
    assert!(text.contains("Amount in Words:"));
}

#[test]
fn long_item_list_paginates_and_repeats_header() {
    let bytes = assemble(&big_invoice(80), None).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let pages = doc.get_pages().len();
    assert!(pages >= 2, "expected pagination, got {pages} page(s)");

    // The column header row reappears on the continuation page.
    let text = doc.extract_text(&[2]).unwrap();
    assert!(text.contains("Amount"));
    assert!(text.contains("Qty"));
}

#[test]
fn assembly_is_deterministic() {
    let invoice = small_invoice();
    let a = assemble(&invoice, None).unwrap();
    let b = assemble(&invoice, None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn missing_qr_degrades_gracefully() {
    // No QR at all, and a QR that is not a decodable image: both produce
    // a complete document.
    let invoice = small_invoice();
    assert!(assemble(&invoice, None).is_ok());

    let bytes = assemble(&invoice, Some(b"definitely not a png")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(Document::load_mem(&bytes).is_ok());
}

#[test]
fn sparse_metadata_renders_na_instead_of_failing() {
    let invoice = InvoiceBuilder::new(date(2024, 6, 15))
        .order_reference("ORD-1")
        .vendor(VendorBuilder::new("Packwell Traders", "27AAPFU0939F1ZV", "Maharashtra").build())
        .customer(CustomerBuilder::new("N/A", "N/A").build())
        .add_line(LineItemBuilder::new("Item", dec!(0), 0).build())
        .build()
        .unwrap();

    let bytes = assemble(&invoice, None).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let text = doc.extract_text(&[1]).unwrap();
    assert!(text.contains("N/A"));
}

#[test]
fn sixty_char_product_name_wraps_into_row() {
    let name = "Premium biodegradable kraft paper container with vented lids";
    let invoice = InvoiceBuilder::new(date(2024, 6, 15))
        .order_reference("ORD-1")
        .vendor(vendor())
        .customer(CustomerBuilder::new("Cafe Nirvana", "Pune").build())
        .add_line(LineItemBuilder::new(name, dec!(5), 10).gst(dec!(18)).build())
        .build()
        .unwrap();

    let bytes = assemble(&invoice, None).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let text = doc.extract_text(&[1]).unwrap();
    // Wrapped, so the full name never appears on a single extracted line,
    // but every word survives.
    for word in name.split_whitespace() {
        assert!(text.contains(word), "missing wrapped word {word:?}");
    }
}
