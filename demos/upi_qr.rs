use chrono::NaiveDate;
use gstbill::core::*;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() {
    let invoice = InvoiceBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .invoice_number("RB/24-25/0042")
        .order_reference("ORD-88112")
        .payment_mode("UPI")
        .payment_status("Pending")
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
        .customer(CustomerBuilder::new("Cafe Nirvana", "12 MG Road, Pune 411001").build())
        .add_line(
            LineItemBuilder::new("Kraft paper box 750ml", dec!(12.50), 200)
                .gst(dec!(18))
                .build(),
        )
        .shipping(dec!(120))
        .build()
        .expect("invoice should be valid");

    let uri = gstbill::qr::upi_uri(
        "packwell@hdfcbank",
        "Packwell Traders",
        invoice.summary.grand_total,
        "ORD-88112",
    );
    println!("Payment URI: {uri}");

    // Fetches the QR over the network; a failure degrades to a
    // bank-details-only payment block instead of aborting.
    match gstbill::render_invoice(&invoice).await {
        Ok(bytes) => {
            let filename = invoice.invoice_number.filename();
            std::fs::write(&filename, &bytes).expect("write should succeed");
            println!("Wrote {} ({} bytes)", filename, bytes.len());
        }
        Err(e) => eprintln!("assembly failed: {e}"),
    }
}
