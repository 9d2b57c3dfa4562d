use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::bookings_model::{Booking, NewBooking, PaymentEvent};
use super::bookings_traits::{BookingRepositoryTrait, BookingServiceTrait};
use super::payment_status::effective_payment_status;
use super::refund::{compute_refund, RefundQuote};
use super::summary::{summarize, BookingSummary};
use crate::errors::{Result, ValidationError};
use crate::notifications::{notify_best_effort, Notice, NotifierTrait};
use crate::statuses::PaymentStatus;
use crate::Error;

/// Service for managing the booking lifecycle.
pub struct BookingService {
    repository: Arc<dyn BookingRepositoryTrait>,
    notifier: Arc<dyn NotifierTrait>,
}

impl BookingService {
    /// Creates a new BookingService instance.
    pub fn new(
        repository: Arc<dyn BookingRepositoryTrait>,
        notifier: Arc<dyn NotifierTrait>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    /// Re-evaluates the payment status on the way out so readers never see a
    /// stale PENDING past its deadline.
    fn refresh(mut booking: Booking, now: NaiveDateTime) -> Booking {
        booking.payment_status = effective_payment_status(&booking, now);
        booking
    }
}

#[async_trait::async_trait]
impl BookingServiceTrait for BookingService {
    async fn create_booking(&self, new_booking: NewBooking) -> Result<Booking> {
        new_booking.validate()?;
        debug!(
            "Creating booking for user {} on plan {} ({} participants)",
            new_booking.user_id, new_booking.travel_plan_id, new_booking.participants
        );
        self.repository.create(new_booking).await
    }

    fn get_booking(&self, booking_id: &str) -> Result<Booking> {
        let booking = self.repository.get_by_id(booking_id)?;
        Ok(Self::refresh(booking, Self::now()))
    }

    fn list_bookings(&self) -> Result<Vec<Booking>> {
        let now = Self::now();
        let bookings = self.repository.list_all()?;
        Ok(bookings
            .into_iter()
            .map(|b| Self::refresh(b, now))
            .collect())
    }

    fn list_user_bookings(&self, user_id: &str) -> Result<Vec<Booking>> {
        let now = Self::now();
        let bookings = self.repository.list_for_user(user_id)?;
        Ok(bookings
            .into_iter()
            .map(|b| Self::refresh(b, now))
            .collect())
    }

    fn list_host_bookings(&self, host_id: &str) -> Result<Vec<Booking>> {
        let now = Self::now();
        let bookings = self.repository.list_for_host(host_id)?;
        Ok(bookings
            .into_iter()
            .map(|b| Self::refresh(b, now))
            .collect())
    }

    fn booking_summary(&self) -> Result<BookingSummary> {
        let bookings = self.repository.list_all()?;
        Ok(summarize(&bookings, Self::now()))
    }

    fn host_booking_summary(&self, host_id: &str) -> Result<BookingSummary> {
        let bookings = self.repository.list_for_host(host_id)?;
        Ok(summarize(&bookings, Self::now()))
    }

    fn quote_refund(&self, booking_id: &str) -> Result<RefundQuote> {
        let booking = self.get_booking(booking_id)?;
        Ok(compute_refund(&booking, Self::now()))
    }

    async fn apply_payment(&self, event: PaymentEvent) -> Result<Booking> {
        if event.amount_paid <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Payment amount must be positive".to_string(),
            )));
        }

        let booking = self.repository.get_by_id(&event.booking_id)?;
        if booking.payment_status.is_terminal() {
            return Err(Error::Precondition(format!(
                "Booking {} is {} and no longer accepts payments",
                booking.id, booking.payment_status
            )));
        }

        let already_paid = booking.amount_paid.unwrap_or(Decimal::ZERO);
        let amount_paid = already_paid + event.amount_paid;
        if amount_paid > booking.total_price {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Payment of {} would exceed the booking total {}",
                event.amount_paid, booking.total_price
            ))));
        }
        let remaining_amount = booking.total_price - amount_paid;

        let target = if remaining_amount.is_zero() {
            PaymentStatus::FullyPaid
        } else {
            PaymentStatus::PartiallyPaid
        };
        // The stored status (possibly already swept to OVERDUE) must allow
        // the settlement; the transition table is the authority. A further
        // partial payment keeps PARTIALLY_PAID, which is not a transition.
        let payment_status = if booking.payment_status == target {
            target
        } else {
            booking.payment_status.transition_to(target)?
        };

        debug!(
            "Settling payment of {} on booking {} ({} -> {})",
            event.amount_paid, booking.id, booking.payment_status, payment_status
        );
        self.repository
            .settle_payment(&booking.id, amount_paid, remaining_amount, payment_status)
            .await
    }

    async fn cancel_booking(&self, booking_id: &str) -> Result<Booking> {
        let now = Self::now();
        let booking = self.repository.get_by_id(booking_id)?;
        let quote = compute_refund(&booking, now);
        if !quote.allowed {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Cancellation is not allowed: booking must be fully paid and at least 4 days before the trip".to_string(),
            )));
        }

        // The repository conditions the write on FULLY_PAID, so a racing
        // cancellation or payment change makes this fail cleanly.
        let cancelled = self
            .repository
            .cancel(booking_id, quote.refund_amount)
            .await?;

        let user_email = cancelled
            .guests
            .iter()
            .find(|g| g.is_team_lead)
            .map(|g| g.email.clone())
            .unwrap_or_default();
        notify_best_effort(
            &self.notifier,
            Notice::BookingCancelled {
                booking_id: cancelled.id.clone(),
                user_email,
                refund_amount: cancelled.refund_amount,
            },
        )
        .await;

        Ok(cancelled)
    }

    async fn mark_refunded(&self, booking_id: &str) -> Result<Booking> {
        self.repository.mark_refunded(booking_id).await
    }

    async fn sweep_overdue(&self) -> Result<usize> {
        let flipped = self.repository.sweep_overdue(Self::now()).await?;
        if flipped > 0 {
            debug!("Overdue sweep flipped {flipped} bookings");
        }
        Ok(flipped)
    }
}
