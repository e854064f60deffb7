//! Tax-invoice document assembly: fixed section order, vertical-cursor
//! pagination, and a repeated line-item header on continuation pages.

use chrono::NaiveDate;
use lopdf::content::Content;
use lopdf::{Document, Object, Stream, dictionary};
use tracing::warn;

use super::layout::{
    Composer, Font, LINE_HEIGHT, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, fmt_inr, wrap_text,
};
use crate::core::{BillError, InvoiceDocument, LineItem};

const X_RIGHT: f32 = PAGE_WIDTH - MARGIN;

// Line-item table columns. Quantities and amounts are right-aligned.
const X_SNO: f32 = MARGIN;
const X_ITEM: f32 = MARGIN + 34.0;
const X_QTY: f32 = 392.0;
const X_RATE: f32 = 455.0;
const X_GST: f32 = 497.0;
/// Character budget for the item-name column; longer names word-wrap.
const NAME_BUDGET: usize = 38;

/// Left edge of the totals block labels.
const X_TOTALS: f32 = 370.0;

const QR_SIZE: f32 = 90.0;

/// Assemble the invoice into PDF bytes.
///
/// Stateless and deterministic for identical input. `qr_png` is the
/// pre-fetched UPI payment QR (see the `qr` feature); pass `None` to
/// render the payment block without it — a missing or undecodable QR is
/// never fatal.
///
/// # Errors
///
/// [`BillError::Assembly`] when PDF serialization fails. A document with
/// no resolvable identifier cannot reach this point — construction via
/// [`InvoiceDocument::from_order`] or the builder already rejects it.
pub fn assemble(invoice: &InvoiceDocument, qr_png: Option<&[u8]>) -> Result<Vec<u8>, BillError> {
    // Decode up front so a bad image degrades instead of leaving a
    // dangling XObject reference in the content stream.
    let qr_stream = qr_png.and_then(|bytes| match lopdf::xobject::image_from(bytes.to_vec()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            warn!(error = %e, "payment QR image could not be embedded, continuing without it");
            None
        }
    });

    let mut c = Composer::new();
    draw_header(&mut c, invoice);
    draw_metadata(&mut c, invoice);
    draw_bill_to(&mut c, invoice);
    draw_items_table(&mut c, invoice);
    draw_totals(&mut c, invoice);
    draw_amount_in_words(&mut c, invoice);
    draw_payment_block(&mut c, invoice, qr_stream.is_some());
    draw_footer(&mut c);

    build_document(c.into_pages(), qr_stream)
}

fn draw_header(c: &mut Composer, invoice: &InvoiceDocument) {
    c.advance(8.0);
    c.text(MARGIN, 16.0, Font::Bold, &invoice.vendor.business_name);
    c.text_right(X_RIGHT, 12.0, Font::Bold, "TAX INVOICE");
    c.advance(16.0);
    c.text(
        MARGIN,
        9.0,
        Font::Regular,
        &format!("GSTIN: {}", invoice.vendor.gstin),
    );
    c.advance(LINE_HEIGHT);
    c.text(
        MARGIN,
        9.0,
        Font::Regular,
        &format!("State: {}", invoice.vendor.state),
    );
    c.advance(10.0);
    c.hline(MARGIN, X_RIGHT);
    c.advance(18.0);
}

fn draw_metadata(c: &mut Composer, invoice: &InvoiceDocument) {
    let pairs = [
        ("Invoice No.", invoice.invoice_number.label().to_string()),
        ("Invoice Date", fmt_date(Some(invoice.issue_date))),
        ("Order No.", invoice.order_reference.clone()),
        ("Order Date", fmt_date(invoice.order_date)),
        ("Order Status", na(invoice.order_status.as_deref())),
        ("Payment Mode", na(invoice.payment_mode.as_deref())),
        ("Payment Status", na(invoice.payment_status.as_deref())),
    ];

    // Two label/value pairs per row.
    for row in pairs.chunks(2) {
        c.ensure(LINE_HEIGHT);
        c.text(MARGIN, 9.0, Font::Bold, row[0].0);
        c.text(MARGIN + 80.0, 9.0, Font::Regular, &row[0].1);
        if let Some((label, value)) = row.get(1) {
            c.text(320.0, 9.0, Font::Bold, label);
            c.text(400.0, 9.0, Font::Regular, value);
        }
        c.advance(LINE_HEIGHT);
    }
    c.advance(8.0);
}

fn draw_bill_to(c: &mut Composer, invoice: &InvoiceDocument) {
    let address_lines = wrap_text(&invoice.customer.address, 60);
    let block = 2 + address_lines.len() + usize::from(invoice.customer.gstin.is_some());
    c.ensure(block as f32 * LINE_HEIGHT + 8.0);

    c.text(MARGIN, 11.0, Font::Bold, "Bill To");
    c.advance(LINE_HEIGHT + 2.0);
    c.text(MARGIN, 9.0, Font::Bold, &invoice.customer.name);
    c.advance(LINE_HEIGHT);
    for line in &address_lines {
        c.text(MARGIN, 9.0, Font::Regular, line);
        c.advance(LINE_HEIGHT);
    }
    if let Some(gstin) = &invoice.customer.gstin {
        c.text(MARGIN, 9.0, Font::Regular, &format!("GSTIN: {gstin}"));
        c.advance(LINE_HEIGHT);
    }
    c.advance(8.0);
}

fn draw_table_header(c: &mut Composer) {
    c.text(X_SNO, 9.0, Font::Bold, "S.No");
    c.text(X_ITEM, 9.0, Font::Bold, "Item");
    c.text_right(X_QTY, 9.0, Font::Bold, "Qty");
    c.text_right(X_RATE, 9.0, Font::Bold, "Rate");
    c.text_right(X_GST, 9.0, Font::Bold, "GST %");
    c.text_right(X_RIGHT, 9.0, Font::Bold, "Amount");
    c.advance(5.0);
    c.hline(MARGIN, X_RIGHT);
    c.advance(LINE_HEIGHT);
}

fn draw_items_table(c: &mut Composer, invoice: &InvoiceDocument) {
    c.ensure(3.0 * LINE_HEIGHT);
    draw_table_header(c);

    for (i, line) in invoice.lines.iter().enumerate() {
        draw_item_row(c, i + 1, line);
    }

    c.advance(2.0);
    c.hline(MARGIN, X_RIGHT);
    c.advance(LINE_HEIGHT + 4.0);
}

fn draw_item_row(c: &mut Composer, serial: usize, line: &LineItem) {
    let name_lines = wrap_text(&line.name, NAME_BUDGET);
    let row_height = name_lines.len() as f32 * LINE_HEIGHT + 2.0;

    // Keep whole rows on one page; a break repeats the column header.
    if c.ensure(row_height + LINE_HEIGHT) {
        draw_table_header(c);
    }

    // All sibling cells share the row's top baseline; only the item name
    // spills onto sub-lines below it.
    let top = c.y;
    c.text_at(X_SNO, top, 9.0, Font::Regular, &serial.to_string());
    for (k, part) in name_lines.iter().enumerate() {
        c.text_at(
            X_ITEM,
            top - k as f32 * LINE_HEIGHT,
            9.0,
            Font::Regular,
            part,
        );
    }
    c.text_right(X_QTY, 9.0, Font::Regular, &line.quantity.to_string());
    c.text_right(X_RATE, 9.0, Font::Regular, &fmt_inr(line.unit_price));
    c.text_right(
        X_GST,
        9.0,
        Font::Regular,
        &format!("{}%", line.tax_rate.normalize()),
    );
    c.text_right(X_RIGHT, 9.0, Font::Regular, &fmt_inr(line.total()));

    c.advance(row_height);
}

fn draw_totals(c: &mut Composer, invoice: &InvoiceDocument) {
    let s = &invoice.summary;
    let rows = 3 + 2 * s.tax_split.len() + usize::from(s.coupon_discount > rust_decimal::Decimal::ZERO);
    c.ensure(rows as f32 * LINE_HEIGHT + 12.0);

    let mut row = |c: &mut Composer, label: &str, value: String, font: Font| {
        c.text(X_TOTALS, 9.0, font, label);
        c.text_right(X_RIGHT, 9.0, font, &value);
        c.advance(LINE_HEIGHT);
    };

    row(c, "Subtotal", fmt_inr(s.subtotal), Font::Regular);
    for group in &s.tax_split {
        let half = group.half_rate.normalize();
        row(
            c,
            &format!("CGST @ {half}%"),
            fmt_inr(group.half_amount),
            Font::Regular,
        );
        row(
            c,
            &format!("SGST @ {half}%"),
            fmt_inr(group.half_amount),
            Font::Regular,
        );
    }
    let shipping = if s.shipping_charge.is_zero() {
        "Free".to_string()
    } else {
        fmt_inr(s.shipping_charge)
    };
    row(c, "Shipping", shipping, Font::Regular);
    if s.coupon_discount > rust_decimal::Decimal::ZERO {
        let label = match &invoice.coupon_code {
            Some(code) => format!("Coupon ({code})"),
            None => "Coupon Discount".to_string(),
        };
        row(c, &label, format!("-{}", fmt_inr(s.coupon_discount)), Font::Regular);
    }
    c.advance(2.0);
    c.hline(X_TOTALS, X_RIGHT);
    c.advance(LINE_HEIGHT);
    row(c, "Grand Total", fmt_inr(s.grand_total), Font::Bold);
    c.advance(6.0);
}

fn draw_amount_in_words(c: &mut Composer, invoice: &InvoiceDocument) {
    let lines = wrap_text(&invoice.amount_in_words, 90);
    c.ensure((lines.len() + 1) as f32 * LINE_HEIGHT + 6.0);
    c.text(MARGIN, 9.0, Font::Bold, "Amount in Words:");
    c.advance(LINE_HEIGHT);
    for line in &lines {
        c.text(MARGIN, 9.0, Font::Regular, line);
        c.advance(LINE_HEIGHT);
    }
    c.advance(8.0);
}

fn draw_payment_block(c: &mut Composer, invoice: &InvoiceDocument, has_qr: bool) {
    let Some(bank) = &invoice.vendor.bank else {
        return;
    };

    let block_height = (7.0 * LINE_HEIGHT).max(QR_SIZE + LINE_HEIGHT) + 8.0;
    c.ensure(block_height);
    let top = c.y;

    c.text(MARGIN, 11.0, Font::Bold, "Payment Details");
    c.advance(LINE_HEIGHT + 2.0);
    let rows = [
        ("Bank", bank.bank_name.as_str()),
        ("Branch", bank.branch.as_str()),
        ("IFSC", bank.ifsc.as_str()),
        ("A/c Holder", bank.account_holder.as_str()),
        ("A/c No.", bank.account_number.as_str()),
        ("UPI", bank.upi_id.as_str()),
    ];
    for (label, value) in rows {
        c.text(MARGIN, 9.0, Font::Bold, label);
        c.text(MARGIN + 60.0, 9.0, Font::Regular, value);
        c.advance(LINE_HEIGHT);
    }

    if has_qr {
        c.image(
            super::layout::QR_XOBJECT,
            X_RIGHT - QR_SIZE,
            top - QR_SIZE,
            QR_SIZE,
            QR_SIZE,
        );
        c.text_at(
            X_RIGHT - QR_SIZE,
            top - QR_SIZE - LINE_HEIGHT,
            8.0,
            Font::Regular,
            "Scan to pay via UPI",
        );
    }
    c.advance(8.0);
}

fn draw_footer(c: &mut Composer) {
    c.ensure(2.0 * LINE_HEIGHT + 10.0);
    c.advance(6.0);
    c.hline(MARGIN, X_RIGHT);
    c.advance(LINE_HEIGHT);
    c.text(
        MARGIN,
        7.5,
        Font::Regular,
        "This is a computer generated tax invoice and does not require a signature.",
    );
    c.advance(LINE_HEIGHT - 3.0);
    c.text(MARGIN, 7.5, Font::Regular, "E. & O. E.");
}

fn build_document(
    pages: Vec<Vec<lopdf::content::Operation>>,
    qr: Option<Stream>,
) -> Result<Vec<u8>, BillError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let mut resources = dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_regular),
            "F2" => Object::Reference(font_bold),
        },
    };
    if let Some(stream) = qr {
        let qr_id = doc.add_object(stream);
        resources.set(
            "XObject",
            dictionary! { "Im1" => Object::Reference(qr_id) },
        );
    }
    let resources_id = doc.add_object(resources);

    let count = pages.len();
    let mut kids = Vec::with_capacity(count);
    for ops in pages {
        let content = Content { operations: ops };
        let encoded = content
            .encode()
            .map_err(|e| BillError::Assembly(format!("content encoding failed: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => Object::Array(kids),
        "Count" => Object::Integer(count as i64),
        "Resources" => Object::Reference(resources_id),
        "MediaBox" => Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            PAGE_WIDTH.into(),
            PAGE_HEIGHT.into(),
        ]),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| BillError::Assembly(format!("failed to save PDF: {e}")))?;
    Ok(out)
}

fn na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d-%m-%Y").to_string(),
        None => "N/A".to_string(),
    }
}
