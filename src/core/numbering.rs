use chrono::{Datelike, NaiveDate};

use super::error::BillError;

/// Consecutive invoice number series per Indian financial year.
///
/// GST rules require a consecutive serial number unique within the
/// financial year (April–March). Numbers take the form
/// `{prefix}{YY-YY}/{serial}`, e.g. "RB/24-25/0001".
#[derive(Debug, Clone)]
pub struct InvoiceSeries {
    prefix: String,
    /// Calendar year the financial year starts in (April).
    fy_start: i32,
    next_serial: u64,
    zero_pad: usize,
}

impl InvoiceSeries {
    /// Create a series starting at serial 1 for the financial year
    /// beginning April of `fy_start`.
    pub fn new(prefix: impl Into<String>, fy_start: i32) -> Self {
        Self {
            prefix: prefix.into(),
            fy_start,
            next_serial: 1,
            zero_pad: 4,
        }
    }

    /// Continue a series from a given serial (e.g. after reloading state).
    pub fn starting_at(prefix: impl Into<String>, fy_start: i32, next_serial: u64) -> Self {
        Self {
            prefix: prefix.into(),
            fy_start,
            next_serial,
            zero_pad: 4,
        }
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    fn fy_label(&self) -> String {
        format!(
            "{:02}-{:02}",
            self.fy_start % 100,
            (self.fy_start + 1) % 100
        )
    }

    /// Issue the next invoice number.
    pub fn next_number(&mut self) -> String {
        let serial = self.next_serial;
        self.next_serial += 1;
        format!(
            "{}{}/{:0>width$}",
            self.prefix,
            self.fy_label(),
            serial,
            width = self.zero_pad
        )
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        format!(
            "{}{}/{:0>width$}",
            self.prefix,
            self.fy_label(),
            self.next_serial,
            width = self.zero_pad
        )
    }

    /// Financial year this series is issuing for (April start year).
    pub fn fy_start(&self) -> i32 {
        self.fy_start
    }

    /// Next serial that will be issued (unformatted).
    pub fn next_raw(&self) -> u64 {
        self.next_serial
    }

    /// Roll into a new financial year, resetting the serial to 1.
    pub fn advance_year(&mut self, new_fy_start: i32) -> Result<(), BillError> {
        if new_fy_start <= self.fy_start {
            return Err(BillError::Numbering(format!(
                "new financial year {new_fy_start} must be greater than current {}",
                self.fy_start
            )));
        }
        self.fy_start = new_fy_start;
        self.next_serial = 1;
        Ok(())
    }

    /// Roll the series automatically if `date` falls in a later financial
    /// year (a date in January–March belongs to the previous year's FY).
    /// Returns true if the series advanced.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        let fy = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };
        if fy > self.fy_start {
            self.fy_start = fy;
            self.next_serial = 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_serials() {
        let mut series = InvoiceSeries::new("RB/", 2024);
        assert_eq!(series.next_number(), "RB/24-25/0001");
        assert_eq!(series.next_number(), "RB/24-25/0002");
        assert_eq!(series.next_number(), "RB/24-25/0003");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut series = InvoiceSeries::new("RB/", 2024);
        assert_eq!(series.peek(), "RB/24-25/0001");
        assert_eq!(series.peek(), "RB/24-25/0001");
        assert_eq!(series.next_number(), "RB/24-25/0001");
        assert_eq!(series.peek(), "RB/24-25/0002");
    }

    #[test]
    fn starting_at_and_padding() {
        let mut series = InvoiceSeries::starting_at("INV/", 2024, 42).with_padding(3);
        assert_eq!(series.next_number(), "INV/24-25/042");
    }

    #[test]
    fn fiscal_year_rolls_on_april_first() {
        let mut series = InvoiceSeries::new("RB/", 2024);
        series.next_number();

        // March 2025 is still FY 24-25
        let march = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert!(!series.auto_advance(march));
        assert_eq!(series.next_number(), "RB/24-25/0002");

        // April 2025 starts FY 25-26
        let april = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert!(series.auto_advance(april));
        assert_eq!(series.next_number(), "RB/25-26/0001");
    }

    #[test]
    fn advance_year_rejects_past() {
        let mut series = InvoiceSeries::new("RB/", 2024);
        assert!(series.advance_year(2023).is_err());
        assert!(series.advance_year(2024).is_err());
        assert!(series.advance_year(2025).is_ok());
        assert_eq!(series.next_number(), "RB/25-26/0001");
    }
}
