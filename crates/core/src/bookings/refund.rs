//! Cancellation refund calculator.
//!
//! Maps days-until-trip to the refund tier and prices the refund. The quote
//! is advisory until the cancellation is confirmed; confirmation is a service
//! concern (see `BookingService::cancel_booking`).

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::bookings::Booking;
use crate::statuses::PaymentStatus;
use crate::utils::time_utils::days_until_trip;

/// Cancellations inside this window are blocked entirely.
pub const MIN_CANCELLATION_NOTICE_DAYS: i64 = 4;

/// Outcome of a refund quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundQuote {
    pub allowed: bool,
    pub refund_percentage: u32,
    pub refund_amount: Decimal,
}

impl RefundQuote {
    fn blocked() -> Self {
        Self {
            allowed: false,
            refund_percentage: 0,
            refund_amount: Decimal::ZERO,
        }
    }
}

/// Refund tier for a trip this many days away.
pub fn refund_percentage(days_until_trip: i64) -> u32 {
    if days_until_trip >= 30 {
        100
    } else if days_until_trip >= 14 {
        80
    } else if days_until_trip >= 7 {
        50
    } else if days_until_trip >= MIN_CANCELLATION_NOTICE_DAYS {
        20
    } else {
        0
    }
}

/// Quotes the refund for cancelling `booking` at `now`.
///
/// Only fully paid bookings qualify, and never within
/// [`MIN_CANCELLATION_NOTICE_DAYS`] of the trip start. The amount is floored
/// to whole currency units so we never refund a paisa more than owed.
pub fn compute_refund(booking: &Booking, now: NaiveDateTime) -> RefundQuote {
    if booking.payment_status != PaymentStatus::FullyPaid {
        return RefundQuote::blocked();
    }

    let days = days_until_trip(booking.start_date, now);
    if days < MIN_CANCELLATION_NOTICE_DAYS {
        return RefundQuote::blocked();
    }

    let percentage = refund_percentage(days);
    let base = booking.amount_paid.unwrap_or(booking.total_price);
    let refund_amount = (base * Decimal::from(percentage) / Decimal::from(100)).floor();

    RefundQuote {
        allowed: true,
        refund_percentage: percentage,
        refund_amount,
    }
}
