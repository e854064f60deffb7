use chrono::NaiveDate;
use gstbill::core::*;

const ORDER_JSON: &str = r#"{
    "_id": "665f1c2a9b3e4d0012a8b4ff",
    "orderNumber": "ORD-88112",
    "orderStatus": "Delivered",
    "paymentMethod": "UPI",
    "paymentStatus": "Paid",
    "items": [
        {
            "productName": "Kraft paper box 750ml",
            "price": 12.5,
            "quantity": 200,
            "gstPercentage": 18,
            "gstAmount": 450,
            "total": 2950
        },
        {
            "productName": "Paper napkin 1-ply (pack of 100)",
            "price": 45,
            "quantity": 20,
            "gstPercentage": 12
        }
    ],
    "billingDetails": {
        "cartTotal": 3400,
        "gstAmount": 558,
        "shippingCharges": 120,
        "totalAmount": 4078
    },
    "deliveryAddress": {
        "name": "Cafe Nirvana",
        "street": "12 MG Road",
        "city": "Pune",
        "state": "Maharashtra",
        "pincode": "411001",
        "phone": "+91 98220 11223"
    },
    "createdAt": "2024-06-10T08:30:00Z"
}"#;

fn main() {
    let order: OrderRecord = serde_json::from_str(ORDER_JSON).expect("order should parse");

    let vendor = VendorBuilder::new("Packwell Traders", "27AAPFU0939F1ZV", "Maharashtra").build();
    let issue_date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    let invoice =
        InvoiceDocument::from_order(&order, vendor, issue_date).expect("order should convert");

    // No invoiceNumber on the record, so the label falls back to the order id
    println!("Invoice:  {}", invoice.invoice_number.label());
    println!("Filename: {}", invoice.invoice_number.filename());
    println!("Order:    {}", invoice.order_reference);
    println!("Buyer:    {}", invoice.customer.name);
    println!("Address:  {}", invoice.customer.address);
    println!("---");
    for line in &invoice.lines {
        println!("  {} x {} = {}", line.quantity, line.name, line.total());
    }
    println!("---");
    // Stored billingDetails totals are authoritative; a mismatch against the
    // recomputation is logged, not fatal.
    println!("Subtotal: {}", invoice.summary.subtotal);
    println!("GST:      {}", invoice.summary.tax_total);
    println!("Shipping: {}", invoice.summary.shipping_charge);
    println!("Total:    {}", invoice.summary.grand_total);
    println!("In words: {}", invoice.amount_in_words);
}
