//! Billing engine: GST totals, CGST/SGST split, and reconciliation
//! against stored order totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use super::error::BillError;
use super::types::{BillingSummary, LineItem, TaxGroup};

/// Tolerance for comparing recomputed totals against stored ones.
pub const RECONCILE_TOLERANCE: Decimal = dec!(0.01);

/// Compute a [`BillingSummary`] from an order's line items.
///
/// Iterates the items once, accumulating net and GST totals and grouping
/// GST by distinct rate. Each rate group is halved into equal CGST and
/// SGST components (intra-state supply — no inter-state IGST regime is
/// modeled). Lines at a 0% rate contribute to the subtotal but never
/// emit a tax group.
///
/// `shipping` and `coupon_discount` default to zero when the order has
/// none; pass `Decimal::ZERO`.
///
/// # Errors
///
/// [`BillError::InvalidOrder`] when `lines` is empty or any line carries
/// a negative price, rate, or stored amount.
pub fn compute_summary(
    lines: &[LineItem],
    shipping: Decimal,
    coupon_discount: Decimal,
) -> Result<BillingSummary, BillError> {
    if lines.is_empty() {
        return Err(BillError::InvalidOrder(
            "order has no line items".into(),
        ));
    }

    let mut subtotal = Decimal::ZERO;
    let mut tax_total = Decimal::ZERO;
    // Keyed by rate rounded to 2 dp so 5 and 5.00 land in one group.
    let mut groups: BTreeMap<Decimal, Decimal> = BTreeMap::new();

    for (i, line) in lines.iter().enumerate() {
        if line.unit_price.is_sign_negative() {
            return Err(BillError::InvalidOrder(format!(
                "line {i}: negative unit price {}",
                line.unit_price
            )));
        }
        if line.tax_rate.is_sign_negative() {
            return Err(BillError::InvalidOrder(format!(
                "line {i}: negative GST rate {}",
                line.tax_rate
            )));
        }
        let net = line.net_amount();
        if net.is_sign_negative() {
            return Err(BillError::InvalidOrder(format!(
                "line {i}: negative net amount {net}"
            )));
        }

        let tax = line.tax();
        subtotal += net;
        tax_total += tax;

        let rate = line.tax_rate.round_dp(2);
        if !rate.is_zero() {
            *groups.entry(rate).or_insert(Decimal::ZERO) += tax;
        }
    }

    let tax_split = groups
        .into_iter()
        .map(|(rate, tax)| TaxGroup {
            rate,
            half_rate: rate / dec!(2),
            half_amount: round_half_up(tax / dec!(2), 2),
        })
        .collect();

    let mut grand_total = subtotal + tax_total + shipping - coupon_discount;
    if grand_total.is_sign_negative() {
        warn!(
            %grand_total,
            %coupon_discount,
            "coupon discount exceeds order value, clamping grand total to zero"
        );
        grand_total = Decimal::ZERO;
    }

    Ok(BillingSummary {
        subtotal,
        tax_total,
        tax_split,
        shipping_charge: shipping,
        coupon_discount,
        grand_total,
    })
}

/// Outcome of comparing a stored billing summary against a recomputed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Stored and recomputed totals agree within [`RECONCILE_TOLERANCE`].
    Consistent,
    /// One or more totals diverge. The stored values remain authoritative;
    /// this is diagnostic only and is never auto-corrected.
    Mismatch(Vec<FieldMismatch>),
}

impl Reconciliation {
    pub fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent)
    }
}

/// A single diverging total, for manual audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: &'static str,
    pub stored: Decimal,
    pub recomputed: Decimal,
}

/// Compare stored order totals against a fresh recomputation.
///
/// Persisted financial records are never silently overwritten: on mismatch
/// the stored summary stays authoritative, a warning is logged per field,
/// and the discrepancies are returned for audit.
pub fn reconcile(stored: &BillingSummary, recomputed: &BillingSummary) -> Reconciliation {
    let mut mismatches = Vec::new();

    let checks = [
        ("subtotal", stored.subtotal, recomputed.subtotal),
        ("tax_total", stored.tax_total, recomputed.tax_total),
        ("grand_total", stored.grand_total, recomputed.grand_total),
    ];
    for (field, stored_v, recomputed_v) in checks {
        if (stored_v - recomputed_v).abs() > RECONCILE_TOLERANCE {
            warn!(
                field,
                stored = %stored_v,
                recomputed = %recomputed_v,
                "billing reconciliation mismatch, keeping stored value"
            );
            mismatches.push(FieldMismatch {
                field,
                stored: stored_v,
                recomputed: recomputed_v,
            });
        }
    }

    if mismatches.is_empty() {
        Reconciliation::Consistent
    } else {
        Reconciliation::Mismatch(mismatches)
    }
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: Decimal, qty: u32, rate: Decimal) -> LineItem {
        LineItem {
            name: "item".into(),
            unit_price: price,
            quantity: qty,
            tax_rate: rate,
            subtotal: None,
            tax_amount: None,
        }
    }

    #[test]
    fn empty_order_rejected() {
        let err = compute_summary(&[], Decimal::ZERO, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, BillError::InvalidOrder(_)));
    }

    #[test]
    fn single_rate_split() {
        let lines = vec![line(dec!(100), 2, dec!(18))];
        let s = compute_summary(&lines, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(s.subtotal, dec!(200));
        assert_eq!(s.tax_total, dec!(36.00));
        assert_eq!(s.tax_split.len(), 1);
        assert_eq!(s.tax_split[0].rate, dec!(18));
        assert_eq!(s.tax_split[0].half_rate, dec!(9));
        assert_eq!(s.tax_split[0].half_amount, dec!(18.00));
        assert_eq!(s.grand_total, dec!(236.00));
    }

    #[test]
    fn two_rate_groups_sorted_ascending() {
        let lines = vec![
            line(dec!(100), 1, dec!(18)),
            line(dec!(200), 1, dec!(5)),
            line(dec!(50), 2, dec!(18)),
        ];
        let s = compute_summary(&lines, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(s.tax_split.len(), 2);
        assert_eq!(s.tax_split[0].rate, dec!(5));
        assert_eq!(s.tax_split[1].rate, dec!(18));
        // 18% group: 100 * 0.18 + 100 * 0.18 = 36 → halves of 18 each
        assert_eq!(s.tax_split[1].half_amount, dec!(18.00));
    }

    #[test]
    fn equal_rates_with_different_scale_merge() {
        let lines = vec![line(dec!(100), 1, dec!(5)), line(dec!(100), 1, dec!(5.00))];
        let s = compute_summary(&lines, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(s.tax_split.len(), 1);
    }

    #[test]
    fn zero_rate_emits_no_group() {
        let lines = vec![line(dec!(100), 1, dec!(0))];
        let s = compute_summary(&lines, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(s.tax_total, dec!(0.00));
        assert!(s.tax_split.is_empty());
    }

    #[test]
    fn zero_quantity_and_zero_price_are_legal() {
        let lines = vec![
            line(dec!(100), 0, dec!(18)),
            line(dec!(0), 5, dec!(18)),
            line(dec!(10), 1, dec!(18)),
        ];
        let s = compute_summary(&lines, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(s.subtotal, dec!(10));
        assert_eq!(s.tax_total, dec!(1.80));
    }

    #[test]
    fn negative_price_rejected() {
        let lines = vec![line(dec!(-5), 1, dec!(18))];
        assert!(compute_summary(&lines, Decimal::ZERO, Decimal::ZERO).is_err());
    }

    #[test]
    fn shipping_and_coupon_applied() {
        let lines = vec![line(dec!(100), 1, dec!(18))];
        let s = compute_summary(&lines, dec!(40), dec!(25)).unwrap();
        // 100 + 18 + 40 - 25
        assert_eq!(s.grand_total, dec!(133.00));
    }

    #[test]
    fn grand_total_clamped_at_zero() {
        let lines = vec![line(dec!(10), 1, dec!(0))];
        let s = compute_summary(&lines, Decimal::ZERO, dec!(500)).unwrap();
        assert_eq!(s.grand_total, Decimal::ZERO);
    }

    #[test]
    fn odd_paisa_halves_round_half_up() {
        // 5% of 10.10 = 0.505 → rounds to 0.51; halves: 0.2525 → 0.25 each
        let lines = vec![line(dec!(10.10), 1, dec!(5))];
        let s = compute_summary(&lines, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(s.tax_total, dec!(0.51));
        assert_eq!(s.tax_split[0].half_amount, dec!(0.25));
        // Halves sum back to the group tax within a paisa
        let halves = s.tax_split[0].half_amount * dec!(2);
        assert!((halves - s.tax_total).abs() <= RECONCILE_TOLERANCE);
    }

    #[test]
    fn stored_line_amounts_take_precedence() {
        let mut l = line(dec!(100), 2, dec!(18));
        l.subtotal = Some(dec!(190));
        l.tax_amount = Some(dec!(34.20));
        let s = compute_summary(&[l], Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(s.subtotal, dec!(190));
        assert_eq!(s.tax_total, dec!(34.20));
    }

    #[test]
    fn reconcile_consistent_roundtrip() {
        let lines = vec![line(dec!(49.90), 3, dec!(12))];
        let s = compute_summary(&lines, dec!(30), Decimal::ZERO).unwrap();
        let again = compute_summary(&lines, dec!(30), Decimal::ZERO).unwrap();
        assert!(reconcile(&s, &again).is_consistent());
    }

    #[test]
    fn reconcile_reports_divergence() {
        let lines = vec![line(dec!(100), 1, dec!(18))];
        let recomputed = compute_summary(&lines, Decimal::ZERO, Decimal::ZERO).unwrap();
        let mut stored = recomputed.clone();
        stored.subtotal += dec!(5);
        match reconcile(&stored, &recomputed) {
            Reconciliation::Mismatch(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "subtotal");
                assert_eq!(fields[0].stored, dec!(105));
            }
            Reconciliation::Consistent => panic!("expected mismatch"),
        }
    }

    #[test]
    fn reconcile_within_tolerance_is_consistent() {
        let lines = vec![line(dec!(100), 1, dec!(18))];
        let recomputed = compute_summary(&lines, Decimal::ZERO, Decimal::ZERO).unwrap();
        let mut stored = recomputed.clone();
        stored.tax_total += dec!(0.01);
        assert!(reconcile(&stored, &recomputed).is_consistent());
    }
}
