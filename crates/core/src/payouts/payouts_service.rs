use std::sync::Arc;

use chrono::Utc;
use log::debug;

use super::payouts_model::{split_installments, InstallmentKind, NewPayout, Payout};
use super::payouts_traits::{PayoutRepositoryTrait, PayoutServiceTrait};
use crate::bookings::{Booking, BookingRepositoryTrait};
use crate::errors::Result;
use crate::statuses::PaymentStatus;
use crate::Error;

/// Service for managing host payouts.
///
/// Payout creation is a manual admin action over the derived
/// "bookings needing payout" view; nothing here creates payouts
/// automatically.
pub struct PayoutService {
    repository: Arc<dyn PayoutRepositoryTrait>,
    booking_repository: Arc<dyn BookingRepositoryTrait>,
}

impl PayoutService {
    /// Creates a new PayoutService instance.
    pub fn new(
        repository: Arc<dyn PayoutRepositoryTrait>,
        booking_repository: Arc<dyn BookingRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            booking_repository,
        }
    }
}

#[async_trait::async_trait]
impl PayoutServiceTrait for PayoutService {
    async fn create_payout(&self, new_payout: NewPayout) -> Result<Payout> {
        new_payout.validate()?;

        let booking = self.booking_repository.get_by_id(&new_payout.booking_id)?;
        if booking.payment_status != PaymentStatus::FullyPaid {
            return Err(Error::Precondition(format!(
                "Booking {} is {}; only fully paid bookings qualify for a payout",
                booking.id, booking.payment_status
            )));
        }
        if self.repository.exists_for_booking(&booking.id)? {
            return Err(Error::Precondition(format!(
                "Booking {} already has a payout",
                booking.id
            )));
        }

        let (first, second) = split_installments(
            new_payout.total_amount,
            new_payout.first_percent,
            new_payout.first_due_date,
            new_payout.second_due_date,
        )?;

        let now = Utc::now().naive_utc();
        let payout = Payout {
            id: new_payout
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            booking_id: new_payout.booking_id,
            host_id: new_payout.host_id,
            host_name: new_payout.host_name,
            host_email: new_payout.host_email,
            trip_title: new_payout.trip_title,
            user_id: new_payout.user_id,
            user_name: new_payout.user_name,
            user_email: new_payout.user_email,
            trip_start_date: new_payout.trip_start_date,
            trip_end_date: new_payout.trip_end_date,
            total_amount: new_payout.total_amount,
            first,
            second,
            created_at: now,
            updated_at: now,
        };

        debug!(
            "Creating payout {} for booking {} ({} total)",
            payout.id, payout.booking_id, payout.total_amount
        );
        self.repository.insert(payout).await
    }

    fn get_payout(&self, payout_id: &str) -> Result<Payout> {
        self.repository.get_by_id(payout_id)
    }

    fn list_payouts(&self) -> Result<Vec<Payout>> {
        self.repository.list_all()
    }

    fn list_host_payouts(&self, host_id: &str) -> Result<Vec<Payout>> {
        self.repository.list_for_host(host_id)
    }

    fn bookings_needing_payout(&self) -> Result<Vec<Booking>> {
        self.booking_repository.list_needing_payout()
    }

    async fn mark_installment_paid(
        &self,
        payout_id: &str,
        kind: InstallmentKind,
    ) -> Result<Payout> {
        // The PENDING check lives in the conditional UPDATE; validating here
        // as well gives a better message for the common stale-screen case.
        let payout = self.repository.get_by_id(payout_id)?;
        let current = payout.installment(kind).status;
        current.transition_to(crate::statuses::InstallmentStatus::Paid)?;

        self.repository.mark_installment_paid(payout_id, kind).await
    }
}
