//! Booking repository and service traits.
//!
//! These traits define the contract for booking operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::bookings_model::{Booking, NewBooking, PaymentEvent};
use super::refund::RefundQuote;
use super::summary::BookingSummary;
use crate::errors::Result;
use crate::statuses::PaymentStatus;

/// Trait defining the contract for Booking repository operations.
///
/// Write methods are conditional where the domain demands it: the guard is
/// part of the UPDATE itself, so a concurrent writer holding stale state
/// fails cleanly instead of double-applying.
#[async_trait]
pub trait BookingRepositoryTrait: Send + Sync {
    /// Creates a booking together with its guest rows.
    async fn create(&self, new_booking: NewBooking) -> Result<Booking>;

    /// Retrieves a booking (guests included) by its ID.
    fn get_by_id(&self, booking_id: &str) -> Result<Booking>;

    /// Lists every booking.
    fn list_all(&self) -> Result<Vec<Booking>>;

    /// Lists the bookings made by one traveler.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>>;

    /// Lists the bookings against one host's travel plans.
    fn list_for_host(&self, host_id: &str) -> Result<Vec<Booking>>;

    /// Fully paid bookings with no payout record yet.
    fn list_needing_payout(&self) -> Result<Vec<Booking>>;

    /// Records a settled payment: amounts plus the new payment status, and
    /// the booking confirmation when the payment completes.
    async fn settle_payment(
        &self,
        booking_id: &str,
        amount_paid: Decimal,
        remaining_amount: Decimal,
        payment_status: PaymentStatus,
    ) -> Result<Booking>;

    /// Cancels a booking, conditioned on `payment_status = FULLY_PAID`.
    /// Sets both status axes to CANCELLED and records the refund owed.
    async fn cancel(&self, booking_id: &str, refund_amount: Decimal) -> Result<Booking>;

    /// Moves a CANCELLED booking to REFUNDED, conditioned on the current
    /// status, as one atomic row update.
    async fn mark_refunded(&self, booking_id: &str) -> Result<Booking>;

    /// Persists OVERDUE for every PENDING/PARTIALLY_PAID booking whose
    /// deadline has lapsed. Returns the number of rows changed.
    async fn sweep_overdue(&self, now: NaiveDateTime) -> Result<usize>;
}

/// Trait defining the contract for Booking service operations.
#[async_trait]
pub trait BookingServiceTrait: Send + Sync {
    /// Creates a booking after validating the guest list.
    async fn create_booking(&self, new_booking: NewBooking) -> Result<Booking>;

    /// Retrieves a booking with its payment status re-evaluated on read.
    fn get_booking(&self, booking_id: &str) -> Result<Booking>;

    /// Lists every booking, statuses re-evaluated on read.
    fn list_bookings(&self) -> Result<Vec<Booking>>;

    /// Lists one traveler's bookings.
    fn list_user_bookings(&self, user_id: &str) -> Result<Vec<Booking>>;

    /// Lists the bookings against one host's plans.
    fn list_host_bookings(&self, host_id: &str) -> Result<Vec<Booking>>;

    /// Dashboard counts over all bookings.
    fn booking_summary(&self) -> Result<BookingSummary>;

    /// Dashboard counts over one host's bookings.
    fn host_booking_summary(&self, host_id: &str) -> Result<BookingSummary>;

    /// Quotes what a cancellation right now would refund.
    fn quote_refund(&self, booking_id: &str) -> Result<RefundQuote>;

    /// Applies a gateway payment confirmation.
    async fn apply_payment(&self, event: PaymentEvent) -> Result<Booking>;

    /// Cancels a booking under the refund rules and notifies the traveler.
    async fn cancel_booking(&self, booking_id: &str) -> Result<Booking>;

    /// Admin confirmation that the refund was disbursed.
    async fn mark_refunded(&self, booking_id: &str) -> Result<Booking>;

    /// Persists OVERDUE for lapsed deadlines; the scheduler calls this.
    async fn sweep_overdue(&self) -> Result<usize>;
}
