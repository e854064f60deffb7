use chrono::NaiveDate;
use gstbill::core::*;
use rust_decimal_macros::dec;

fn main() {
    let invoice = InvoiceBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .invoice_number("RB/24-25/0042")
        .order_reference("ORD-88112")
        .order_date(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
        .order_status("Delivered")
        .payment_mode("UPI")
        .payment_status("Paid")
        .vendor(
            VendorBuilder::new("Packwell Traders", "27AAPFU0939F1ZV", "Maharashtra")
                .bank(BankDetails {
                    bank_name: "HDFC Bank".into(),
                    branch: "Andheri East".into(),
                    ifsc: "HDFC0000123".into(),
                    account_holder: "Packwell Traders".into(),
                    account_number: "50100234567890".into(),
                    upi_id: "packwell@hdfcbank".into(),
                })
                .build(),
        )
        .customer(
            CustomerBuilder::new("Cafe Nirvana", "12 MG Road, Pune 411001")
                .gstin("27AABCU9603R1ZM")
                .build(),
        )
        .add_line(
            LineItemBuilder::new("Kraft paper box 750ml", dec!(12.50), 200)
                .gst(dec!(18))
                .build(),
        )
        .add_line(
            LineItemBuilder::new(
                "Premium biodegradable kraft paper container with vented lids",
                dec!(18.75),
                80,
            )
            .gst(dec!(18))
            .build(),
        )
        .add_line(
            LineItemBuilder::new("Loose rice 5kg", dec!(320), 2)
                .gst(dec!(5))
                .build(),
        )
        .shipping(dec!(120))
        .build()
        .expect("invoice should be valid");

    // No QR image here; the payment block renders bank details only
    let bytes = gstbill::pdf::assemble(&invoice, None).expect("assembly should succeed");

    let filename = invoice.invoice_number.filename();
    std::fs::write(&filename, &bytes).expect("write should succeed");
    println!("Wrote {} ({} bytes)", filename, bytes.len());
}
