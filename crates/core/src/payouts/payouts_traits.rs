//! Payout repository and service traits.

use async_trait::async_trait;

use super::payouts_model::{InstallmentKind, NewPayout, Payout};
use crate::bookings::Booking;
use crate::errors::Result;

/// Trait defining the contract for Payout repository operations.
#[async_trait]
pub trait PayoutRepositoryTrait: Send + Sync {
    /// Persists a fully assembled payout (id and installments already set).
    async fn insert(&self, payout: Payout) -> Result<Payout>;

    /// Retrieves a payout by its ID.
    fn get_by_id(&self, payout_id: &str) -> Result<Payout>;

    /// Lists every payout.
    fn list_all(&self) -> Result<Vec<Payout>>;

    /// Lists payouts owed to one host.
    fn list_for_host(&self, host_id: &str) -> Result<Vec<Payout>>;

    /// Whether a payout already exists for the booking.
    fn exists_for_booking(&self, booking_id: &str) -> Result<bool>;

    /// Marks one installment PAID, conditioned on its current status
    /// allowing the move (PENDING, or FAILED for a retry). A concurrent
    /// second attempt matches zero rows and fails with a precondition
    /// error instead of double-crediting.
    async fn mark_installment_paid(
        &self,
        payout_id: &str,
        kind: InstallmentKind,
    ) -> Result<Payout>;
}

/// Trait defining the contract for Payout service operations.
#[async_trait]
pub trait PayoutServiceTrait: Send + Sync {
    /// Creates a payout for a booking from the "needing payout" view.
    async fn create_payout(&self, new_payout: NewPayout) -> Result<Payout>;

    /// Retrieves a payout by ID.
    fn get_payout(&self, payout_id: &str) -> Result<Payout>;

    /// Lists every payout.
    fn list_payouts(&self) -> Result<Vec<Payout>>;

    /// Lists payouts owed to one host.
    fn list_host_payouts(&self, host_id: &str) -> Result<Vec<Payout>>;

    /// Fully paid bookings that have no payout record yet.
    fn bookings_needing_payout(&self) -> Result<Vec<Booking>>;

    /// Marks one installment PAID (see repository guard).
    async fn mark_installment_paid(
        &self,
        payout_id: &str,
        kind: InstallmentKind,
    ) -> Result<Payout>;
}
