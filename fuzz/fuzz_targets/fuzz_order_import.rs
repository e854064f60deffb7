#![no_main]

use chrono::NaiveDate;
use gstbill::core::{InvoiceDocument, OrderRecord, VendorBuilder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic — errors are fine, panics are bugs.
        if let Ok(order) = serde_json::from_str::<OrderRecord>(s) {
            let vendor = VendorBuilder::new("Fuzz Traders", "27AAPFU0939F1ZV", "Maharashtra")
                .build();
            let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
            let _ = InvoiceDocument::from_order(&order, vendor, date);
        }
    }
});
