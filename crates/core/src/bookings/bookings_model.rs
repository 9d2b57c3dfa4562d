//! Booking domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bookings::payment_status::PaymentSnapshot;
use crate::bookings::validate_guest_list;
use crate::errors::ValidationError;
use crate::statuses::{BookingStatus, PaymentStatus};
use crate::{Error, Result};

/// A traveler on a booking. Exactly one guest per booking is the team lead,
/// the primary contact for the trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    pub booking_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub is_team_lead: bool,
}

/// Input model for one guest on a new booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGuest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub is_team_lead: bool,
}

/// Domain model representing one reservation of a travel plan.
///
/// Carries two independent status axes: `status` is the confirmation
/// lifecycle, `payment_status` the settlement lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub travel_plan_id: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub total_price: Decimal,
    pub price_per_person: Decimal,
    pub participants: i32,
    pub special_requirements: Option<String>,
    /// Amount owed back to the traveler after a cancellation. Zero until then.
    pub refund_amount: Decimal,
    pub amount_paid: Option<Decimal>,
    pub remaining_amount: Option<Decimal>,
    pub payment_deadline: Option<NaiveDateTime>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub guests: Vec<Guest>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    /// The fields the payment status evaluator classifies on.
    pub fn payment_snapshot(&self) -> PaymentSnapshot {
        PaymentSnapshot {
            total_price: self.total_price,
            amount_paid: self.amount_paid,
            remaining_amount: self.remaining_amount,
            payment_deadline: self.payment_deadline,
        }
    }
}

/// Input model for creating a new booking at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub travel_plan_id: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub price_per_person: Decimal,
    pub participants: i32,
    pub special_requirements: Option<String>,
    pub payment_deadline: Option<NaiveDateTime>,
    pub guests: Vec<NewGuest>,
}

impl NewBooking {
    /// Validates the new booking data, guest list included.
    ///
    /// Guest errors are collected field-by-field (not fail-fast) so the
    /// checkout form can render all of them at once.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.travel_plan_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "travelPlanId".to_string(),
            )));
        }
        if self.participants < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "A booking needs at least one participant".to_string(),
            )));
        }
        if self.end_date < self.start_date {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Trip end date cannot be before the start date".to_string(),
            )));
        }
        if self.price_per_person <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price per person must be positive".to_string(),
            )));
        }
        validate_guest_list(&self.guests, self.participants)?;
        Ok(())
    }

    /// Total price at checkout.
    pub fn total_price(&self) -> Decimal {
        self.price_per_person * Decimal::from(self.participants)
    }
}

/// Payment confirmation delivered by the gateway webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEvent {
    pub booking_id: String,
    pub amount_paid: Decimal,
    pub timestamp: NaiveDateTime,
}
