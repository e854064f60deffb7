#![no_main]

use gstbill::core::amount_in_words;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|input: (i64, u32)| {
    let (mantissa, scale) = input;
    // Any representable decimal must produce well-formed words.
    let amount = Decimal::new(mantissa, scale % 29);
    let words = amount_in_words(amount);
    assert!(words.ends_with("Only"));
});
