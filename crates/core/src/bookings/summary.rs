//! Booking status aggregator.
//!
//! Counts bookings per payment status for the admin and host dashboards.
//! Both consume the same function so the tiles can never disagree.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::bookings::payment_status::effective_payment_status;
use crate::bookings::Booking;
use crate::statuses::PaymentStatus;

/// Counts per payment status plus the derived dashboard buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub pending: usize,
    pub partially_paid: usize,
    pub fully_paid: usize,
    pub overdue: usize,
    pub cancelled: usize,
    pub refunded: usize,
    /// Trip starts in the future and money has moved.
    pub upcoming: usize,
    /// Trip has started, or the booking was cancelled/refunded.
    pub past: usize,
    pub all: usize,
}

impl BookingSummary {
    /// Count for one payment status.
    pub fn count(&self, status: PaymentStatus) -> usize {
        match status {
            PaymentStatus::Pending => self.pending,
            PaymentStatus::PartiallyPaid => self.partially_paid,
            PaymentStatus::FullyPaid => self.fully_paid,
            PaymentStatus::Overdue => self.overdue,
            PaymentStatus::Cancelled => self.cancelled,
            PaymentStatus::Refunded => self.refunded,
        }
    }

    fn bump(&mut self, status: PaymentStatus) {
        match status {
            PaymentStatus::Pending => self.pending += 1,
            PaymentStatus::PartiallyPaid => self.partially_paid += 1,
            PaymentStatus::FullyPaid => self.fully_paid += 1,
            PaymentStatus::Overdue => self.overdue += 1,
            PaymentStatus::Cancelled => self.cancelled += 1,
            PaymentStatus::Refunded => self.refunded += 1,
        }
    }
}

/// Aggregates a collection of bookings into dashboard counts.
///
/// Statuses are re-evaluated on the way through, so a booking whose deadline
/// lapsed since the last sweep already counts as OVERDUE. An empty collection
/// yields all zeros.
pub fn summarize(bookings: &[Booking], now: NaiveDateTime) -> BookingSummary {
    let mut summary = BookingSummary::default();

    for booking in bookings {
        let status = effective_payment_status(booking, now);
        summary.bump(status);

        if booking.start_date > now
            && matches!(
                status,
                PaymentStatus::FullyPaid | PaymentStatus::PartiallyPaid
            )
        {
            summary.upcoming += 1;
        }
        if booking.start_date <= now
            || matches!(status, PaymentStatus::Cancelled | PaymentStatus::Refunded)
        {
            summary.past += 1;
        }

        summary.all += 1;
    }

    summary
}
