//! Payment status evaluator.
//!
//! Pure classification of a booking's settlement state from its amounts and
//! deadline. Admin, host, and traveler views all consume this (directly or
//! through the service layer), so a stored PENDING whose deadline has lapsed
//! reads as OVERDUE everywhere at once, before the sweep has persisted it.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::bookings::Booking;
use crate::statuses::{PaymentStatus, StatusDisplay};

/// The inputs the evaluator classifies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentSnapshot {
    pub total_price: Decimal,
    pub amount_paid: Option<Decimal>,
    pub remaining_amount: Option<Decimal>,
    pub payment_deadline: Option<NaiveDateTime>,
}

/// Classifies a payment snapshot into the authoritative payment status.
///
/// Idempotent: feeding a snapshot back through the evaluator with the same
/// `now` yields the same answer. Never errors for well-formed input.
pub fn evaluate_payment_status(snapshot: &PaymentSnapshot, now: NaiveDateTime) -> PaymentStatus {
    let paid = snapshot.amount_paid.unwrap_or(Decimal::ZERO);
    let settled = match snapshot.remaining_amount {
        Some(remaining) => remaining <= Decimal::ZERO,
        None => paid >= snapshot.total_price,
    };

    let status = if paid > Decimal::ZERO && settled {
        PaymentStatus::FullyPaid
    } else if paid > Decimal::ZERO {
        PaymentStatus::PartiallyPaid
    } else {
        PaymentStatus::Pending
    };

    // A lapsed deadline overrides any unsettled state.
    if matches!(
        status,
        PaymentStatus::Pending | PaymentStatus::PartiallyPaid
    ) {
        if let Some(deadline) = snapshot.payment_deadline {
            if deadline < now {
                return PaymentStatus::Overdue;
            }
        }
    }

    status
}

/// Evaluator plus the canonical display tuple, for callers feeding a view.
pub fn evaluate_payment_status_with_display(
    snapshot: &PaymentSnapshot,
    now: NaiveDateTime,
) -> (PaymentStatus, StatusDisplay) {
    let status = evaluate_payment_status(snapshot, now);
    (status, status.display())
}

/// The status a booking should be read as right now.
///
/// CANCELLED and REFUNDED are administrative facts, not derivable from the
/// amounts, so they pass through; everything else is re-evaluated.
pub fn effective_payment_status(booking: &Booking, now: NaiveDateTime) -> PaymentStatus {
    if booking.payment_status.is_terminal() {
        booking.payment_status
    } else {
        evaluate_payment_status(&booking.payment_snapshot(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;

    fn at_noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn snapshot(
        paid: Option<Decimal>,
        remaining: Option<Decimal>,
        deadline: Option<NaiveDateTime>,
    ) -> PaymentSnapshot {
        PaymentSnapshot {
            total_price: dec!(10000),
            amount_paid: paid,
            remaining_amount: remaining,
            payment_deadline: deadline,
        }
    }

    #[test]
    fn test_untouched_booking_is_pending() {
        let now = at_noon(10);
        let snap = snapshot(None, None, Some(now + Duration::days(3)));
        assert_eq!(evaluate_payment_status(&snap, now), PaymentStatus::Pending);
    }

    #[test]
    fn test_partial_payment() {
        let now = at_noon(10);
        let snap = snapshot(Some(dec!(4000)), Some(dec!(6000)), None);
        assert_eq!(
            evaluate_payment_status(&snap, now),
            PaymentStatus::PartiallyPaid
        );
    }

    #[test]
    fn test_full_payment() {
        let now = at_noon(10);
        let snap = snapshot(Some(dec!(10000)), Some(dec!(0)), None);
        assert_eq!(
            evaluate_payment_status(&snap, now),
            PaymentStatus::FullyPaid
        );
    }

    #[test]
    fn test_full_payment_without_remaining_column() {
        let now = at_noon(10);
        let snap = snapshot(Some(dec!(10000)), None, None);
        assert_eq!(
            evaluate_payment_status(&snap, now),
            PaymentStatus::FullyPaid
        );
    }

    #[test]
    fn test_lapsed_deadline_flips_pending_to_overdue() {
        let now = at_noon(10);
        let snap = snapshot(None, None, Some(now - Duration::seconds(1)));
        assert_eq!(evaluate_payment_status(&snap, now), PaymentStatus::Overdue);
    }

    #[test]
    fn test_lapsed_deadline_flips_partial_to_overdue() {
        let now = at_noon(10);
        let snap = snapshot(
            Some(dec!(4000)),
            Some(dec!(6000)),
            Some(now - Duration::days(1)),
        );
        assert_eq!(evaluate_payment_status(&snap, now), PaymentStatus::Overdue);
    }

    #[test]
    fn test_deadline_does_not_touch_fully_paid() {
        let now = at_noon(10);
        let snap = snapshot(
            Some(dec!(10000)),
            Some(dec!(0)),
            Some(now - Duration::days(1)),
        );
        assert_eq!(
            evaluate_payment_status(&snap, now),
            PaymentStatus::FullyPaid
        );
    }

    #[test]
    fn test_deadline_exactly_now_is_not_overdue() {
        let now = at_noon(10);
        let snap = snapshot(None, None, Some(now));
        assert_eq!(evaluate_payment_status(&snap, now), PaymentStatus::Pending);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let now = at_noon(10);
        for snap in [
            snapshot(None, None, Some(now - Duration::days(1))),
            snapshot(Some(dec!(500)), Some(dec!(9500)), None),
            snapshot(Some(dec!(10000)), Some(dec!(0)), None),
        ] {
            let first = evaluate_payment_status(&snap, now);
            let second = evaluate_payment_status(&snap, now);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_display_tuple_matches_status() {
        let now = at_noon(10);
        let snap = snapshot(None, None, Some(now - Duration::days(2)));
        let (status, display) = evaluate_payment_status_with_display(&snap, now);
        assert_eq!(status, PaymentStatus::Overdue);
        assert_eq!(display, PaymentStatus::Overdue.display());
    }
}
