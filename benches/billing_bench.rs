use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use gstbill::core::*;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn test_vendor() -> Vendor {
    VendorBuilder::new("Packwell Traders", "27AAPFU0939F1ZV", "Maharashtra")
        .bank(BankDetails {
            bank_name: "HDFC Bank".into(),
            branch: "Andheri East".into(),
            ifsc: "HDFC0000123".into(),
            account_holder: "Packwell Traders".into(),
            account_number: "50100234567890".into(),
            upi_id: "packwell@hdfcbank".into(),
        })
        .build()
}

fn make_lines(count: usize) -> Vec<LineItem> {
    (1..=count)
        .map(|i| {
            LineItemBuilder::new(format!("Kraft paper box {i}"), dec!(12.50), i as u32)
                .gst(dec!(18))
                .build()
        })
        .collect()
}

fn build_40_line_invoice() -> InvoiceDocument {
    let mut builder = InvoiceBuilder::new(test_date())
        .invoice_number("RB/24-25/0042")
        .order_reference("ORD-88112")
        .payment_mode("UPI")
        .payment_status("Paid")
        .vendor(test_vendor())
        .customer(
            CustomerBuilder::new("Cafe Nirvana", "12 MG Road, Pune 411001")
                .gstin("27AABCU9603R1ZM")
                .build(),
        )
        .shipping(dec!(120));

    for line in make_lines(40) {
        builder = builder.add_line(line);
    }

    builder.build().unwrap()
}

fn bench_compute_summary(c: &mut Criterion) {
    let small = make_lines(10);
    let large = make_lines(1000);

    c.bench_function("compute_summary_10_lines", |b| {
        b.iter(|| {
            black_box(compute_summary(
                black_box(&small),
                dec!(120),
                Decimal::ZERO,
            ))
        });
    });
    c.bench_function("compute_summary_1000_lines", |b| {
        b.iter(|| {
            black_box(compute_summary(
                black_box(&large),
                dec!(120),
                Decimal::ZERO,
            ))
        });
    });
}

fn bench_build_invoice(c: &mut Criterion) {
    c.bench_function("build_invoice_40_lines", |b| {
        b.iter(|| black_box(build_40_line_invoice()));
    });
}

fn bench_amount_in_words(c: &mut Criterion) {
    c.bench_function("amount_in_words", |b| {
        b.iter(|| black_box(amount_in_words(black_box(dec!(12345678.90)))));
    });
}

fn bench_assemble_pdf(c: &mut Criterion) {
    let invoice = build_40_line_invoice();
    c.bench_function("assemble_pdf_40_lines", |b| {
        b.iter(|| black_box(gstbill::pdf::assemble(black_box(&invoice), None)));
    });
}

criterion_group!(
    benches,
    bench_compute_summary,
    bench_build_invoice,
    bench_amount_in_words,
    bench_assemble_pdf
);
criterion_main!(benches);
