//! Amount-in-words conversion using the Indian numbering system
//! (thousand, lakh = 1,00,000, crore = 1,00,00,000).

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use super::billing::round_half_up;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Spell a grand total as words in the invoice's fixed grammatical pattern:
/// `"<words> Rupees and <words> Paisa Only"`, or `"<words> Rupees Only"`
/// when the paise part is zero.
///
/// Uses Indian grouping deliberately — `100000` is "One Lakh", never
/// "One Hundred Thousand". Magnitudes beyond crore recurse on the crore
/// count ("Twelve Crore ...").
///
/// ```
/// use gstbill::core::amount_in_words;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(amount_in_words(dec!(0)), "Zero Rupees Only");
/// assert_eq!(amount_in_words(dec!(100000)), "One Lakh Rupees Only");
/// ```
pub fn amount_in_words(total: Decimal) -> String {
    let rounded = round_half_up(total.abs(), 2);
    let rupees = rounded.trunc().to_u64().unwrap_or(0);
    let paise = ((rounded - rounded.trunc()) * dec!(100))
        .to_u64()
        .unwrap_or(0);

    let rupee_words = if rupees == 0 {
        "Zero".to_string()
    } else {
        number_words(rupees)
    };

    if paise == 0 {
        format!("{rupee_words} Rupees Only")
    } else {
        format!(
            "{rupee_words} Rupees and {} Paisa Only",
            number_words(paise)
        )
    }
}

/// Words for a positive integer under the Indian grouping.
fn number_words(n: u64) -> String {
    debug_assert!(n > 0);
    let mut parts: Vec<String> = Vec::new();

    let crore = n / 10_000_000;
    let mut rest = n % 10_000_000;
    if crore > 0 {
        parts.push(format!("{} Crore", number_words(crore)));
    }

    let lakh = rest / 100_000;
    rest %= 100_000;
    if lakh > 0 {
        parts.push(format!("{} Lakh", two_digit_words(lakh)));
    }

    let thousand = rest / 1_000;
    rest %= 1_000;
    if thousand > 0 {
        parts.push(format!("{} Thousand", two_digit_words(thousand)));
    }

    let hundred = rest / 100;
    rest %= 100;
    if hundred > 0 {
        parts.push(format!("{} Hundred", ONES[hundred as usize]));
    }

    if rest > 0 {
        parts.push(two_digit_words(rest));
    }

    parts.join(" ")
}

fn two_digit_words(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}
