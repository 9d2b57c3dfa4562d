//! In-memory repository fakes for service-level tests.
//!
//! The fakes mirror the storage layer's conditional-update semantics: guarded
//! writes check the current status and fail with a precondition error when it
//! does not match, exactly as the SQL `WHERE status = ...` clause would.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;

use wayfare_core::bookings::{Booking, BookingRepositoryTrait, Guest, NewBooking};
use wayfare_core::hosts::{
    ApplicationStatus, HostApplication, HostApplicationRepositoryTrait, NewHostApplication, User,
    UserRepositoryTrait,
};
use wayfare_core::payouts::{InstallmentKind, Payout, PayoutRepositoryTrait};
use wayfare_core::statuses::{BookingStatus, InstallmentStatus, PaymentStatus, UserRole};
use wayfare_core::{errors::DatabaseError, Error, Result};

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<HashMap<String, Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepositoryTrait for InMemoryBookingRepository {
    async fn create(&self, new_booking: NewBooking) -> Result<Booking> {
        let now = Utc::now().naive_utc();
        let id = new_booking
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let guests = new_booking
            .guests
            .iter()
            .map(|g| Guest {
                id: uuid::Uuid::new_v4().to_string(),
                booking_id: id.clone(),
                first_name: g.first_name.clone(),
                last_name: g.last_name.clone(),
                email: g.email.clone(),
                phone: g.phone.clone(),
                is_team_lead: g.is_team_lead,
            })
            .collect();
        let booking = Booking {
            id: id.clone(),
            user_id: new_booking.user_id,
            travel_plan_id: new_booking.travel_plan_id,
            start_date: new_booking.start_date,
            end_date: new_booking.end_date,
            total_price: new_booking.price_per_person
                * Decimal::from(new_booking.participants),
            price_per_person: new_booking.price_per_person,
            participants: new_booking.participants,
            special_requirements: new_booking.special_requirements,
            refund_amount: Decimal::ZERO,
            amount_paid: None,
            remaining_amount: None,
            payment_deadline: new_booking.payment_deadline,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            guests,
            created_at: now,
            updated_at: now,
        };
        self.bookings
            .lock()
            .unwrap()
            .insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    fn get_by_id(&self, booking_id: &str) -> Result<Booking> {
        self.bookings
            .lock()
            .unwrap()
            .get(booking_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(booking_id.to_string())))
    }

    fn list_all(&self) -> Result<Vec<Booking>> {
        Ok(self.bookings.lock().unwrap().values().cloned().collect())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_for_host(&self, _host_id: &str) -> Result<Vec<Booking>> {
        // The fake has no plan table to join against.
        self.list_all()
    }

    fn list_needing_payout(&self) -> Result<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.payment_status == PaymentStatus::FullyPaid)
            .cloned()
            .collect())
    }

    async fn settle_payment(
        &self,
        booking_id: &str,
        amount_paid: Decimal,
        remaining_amount: Decimal,
        payment_status: PaymentStatus,
    ) -> Result<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .get_mut(booking_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(booking_id.to_string())))?;
        booking.amount_paid = Some(amount_paid);
        booking.remaining_amount = Some(remaining_amount);
        booking.payment_status = payment_status;
        if payment_status == PaymentStatus::FullyPaid && booking.status == BookingStatus::Pending {
            booking.status = BookingStatus::Confirmed;
        }
        booking.updated_at = Utc::now().naive_utc();
        Ok(booking.clone())
    }

    async fn cancel(&self, booking_id: &str, refund_amount: Decimal) -> Result<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .get_mut(booking_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(booking_id.to_string())))?;
        if booking.payment_status != PaymentStatus::FullyPaid {
            return Err(Error::Precondition(format!(
                "Booking {} is not fully paid",
                booking_id
            )));
        }
        booking.status = BookingStatus::Cancelled;
        booking.payment_status = PaymentStatus::Cancelled;
        booking.refund_amount = refund_amount;
        booking.updated_at = Utc::now().naive_utc();
        Ok(booking.clone())
    }

    async fn mark_refunded(&self, booking_id: &str) -> Result<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .get_mut(booking_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(booking_id.to_string())))?;
        if booking.payment_status != PaymentStatus::Cancelled {
            return Err(Error::Precondition(format!(
                "Booking {} is not awaiting a refund",
                booking_id
            )));
        }
        booking.status = BookingStatus::Refunded;
        booking.payment_status = PaymentStatus::Refunded;
        booking.updated_at = Utc::now().naive_utc();
        Ok(booking.clone())
    }

    async fn sweep_overdue(&self, now: NaiveDateTime) -> Result<usize> {
        let mut bookings = self.bookings.lock().unwrap();
        let mut flipped = 0;
        for booking in bookings.values_mut() {
            let lapsed = booking.payment_deadline.is_some_and(|d| d < now);
            if lapsed
                && matches!(
                    booking.payment_status,
                    PaymentStatus::Pending | PaymentStatus::PartiallyPaid
                )
            {
                booking.payment_status = PaymentStatus::Overdue;
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}

#[derive(Default)]
pub struct InMemoryPayoutRepository {
    payouts: Mutex<HashMap<String, Payout>>,
}

impl InMemoryPayoutRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayoutRepositoryTrait for InMemoryPayoutRepository {
    async fn insert(&self, payout: Payout) -> Result<Payout> {
        self.payouts
            .lock()
            .unwrap()
            .insert(payout.id.clone(), payout.clone());
        Ok(payout)
    }

    fn get_by_id(&self, payout_id: &str) -> Result<Payout> {
        self.payouts
            .lock()
            .unwrap()
            .get(payout_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(payout_id.to_string())))
    }

    fn list_all(&self) -> Result<Vec<Payout>> {
        Ok(self.payouts.lock().unwrap().values().cloned().collect())
    }

    fn list_for_host(&self, host_id: &str) -> Result<Vec<Payout>> {
        Ok(self
            .payouts
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.host_id == host_id)
            .cloned()
            .collect())
    }

    fn exists_for_booking(&self, booking_id: &str) -> Result<bool> {
        Ok(self
            .payouts
            .lock()
            .unwrap()
            .values()
            .any(|p| p.booking_id == booking_id))
    }

    async fn mark_installment_paid(
        &self,
        payout_id: &str,
        kind: InstallmentKind,
    ) -> Result<Payout> {
        let mut payouts = self.payouts.lock().unwrap();
        let payout = payouts
            .get_mut(payout_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(payout_id.to_string())))?;
        let installment = match kind {
            InstallmentKind::First => &mut payout.first,
            InstallmentKind::Second => &mut payout.second,
        };
        if !matches!(
            installment.status,
            InstallmentStatus::Pending | InstallmentStatus::Failed
        ) {
            return Err(Error::Precondition(format!(
                "Installment {kind} of payout {payout_id} is already {}",
                installment.status
            )));
        }
        installment.status = InstallmentStatus::Paid;
        payout.updated_at = Utc::now().naive_utc();
        Ok(payout.clone())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn with_user(user: User) -> Self {
        let repo = Self::default();
        repo.users.lock().unwrap().insert(user.id.clone(), user);
        repo
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryUserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        self.users
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(user_id.to_string())))
    }

    fn list_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn set_role(&self, user_id: &str, role: UserRole) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(user_id.to_string())))?;
        user.role = role;
        user.updated_at = Utc::now().naive_utc();
        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: Mutex<HashMap<String, HostApplication>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HostApplicationRepositoryTrait for InMemoryApplicationRepository {
    async fn create(&self, new_application: NewHostApplication) -> Result<HostApplication> {
        let application = HostApplication {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: new_application.user_id,
            motivation: new_application.motivation,
            status: ApplicationStatus::Pending,
            applied_at: Utc::now().naive_utc(),
            decided_at: None,
        };
        self.applications
            .lock()
            .unwrap()
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn get_by_id(&self, application_id: &str) -> Result<HostApplication> {
        self.applications
            .lock()
            .unwrap()
            .get(application_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(application_id.to_string())))
    }

    fn list_pending(&self) -> Result<Vec<HostApplication>> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.status == ApplicationStatus::Pending)
            .cloned()
            .collect())
    }

    async fn decide(
        &self,
        application_id: &str,
        status: ApplicationStatus,
        decided_at: NaiveDateTime,
    ) -> Result<HostApplication> {
        let mut applications = self.applications.lock().unwrap();
        let application = applications
            .get_mut(application_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(application_id.to_string())))?;
        if application.status != ApplicationStatus::Pending {
            return Err(Error::Precondition(format!(
                "Application {application_id} was already decided"
            )));
        }
        application.status = status;
        application.decided_at = Some(decided_at);
        Ok(application.clone())
    }
}
