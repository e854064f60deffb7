use chrono::NaiveDate;
use gstbill::core::*;
use rust_decimal_macros::dec;

fn main() {
    // A typical packaging-supplies order for a restaurant buyer
    let invoice = InvoiceBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .invoice_number("RB/24-25/0042")
        .order_reference("ORD-88112")
        .order_date(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
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
            LineItemBuilder::new("Paper napkin 1-ply (pack of 100)", dec!(45), 20)
                .gst(dec!(12))
                .build(),
        )
        .add_line(
            LineItemBuilder::new("Loose rice 5kg", dec!(320), 2)
                .gst(dec!(5))
                .build(),
        )
        .shipping(dec!(120))
        .coupon("FIRST50", dec!(50))
        .build()
        .expect("invoice should be valid");

    println!("Invoice: {}", invoice.invoice_number.label());
    println!("Date:    {}", invoice.issue_date);
    println!("Buyer:   {}", invoice.customer.name);
    println!("---");
    for line in &invoice.lines {
        println!(
            "  {} x {} @ {} (GST {}%) = {}",
            line.quantity,
            line.name,
            line.unit_price,
            line.tax_rate,
            line.total()
        );
    }
    println!("---");
    println!("Subtotal: {}", invoice.summary.subtotal);
    for group in &invoice.summary.tax_split {
        println!("CGST @ {}%: {}", group.half_rate, group.half_amount);
        println!("SGST @ {}%: {}", group.half_rate, group.half_amount);
    }
    println!("Shipping: {}", invoice.summary.shipping_charge);
    println!("Coupon:   -{}", invoice.summary.coupon_discount);
    println!("Total:    {}", invoice.summary.grand_total);
    println!("In words: {}", invoice.amount_in_words);
}
