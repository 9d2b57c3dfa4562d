//! Database models for bookings and guests.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{parse_money, parse_money_opt};
use wayfare_core::bookings::{Booking, Guest};
use wayfare_core::errors::{DatabaseError, Error, Result};
use wayfare_core::statuses::{BookingStatus, PaymentStatus};

/// Database model for bookings. Money travels as decimal strings.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::bookings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BookingDB {
    pub id: String,
    pub user_id: String,
    pub travel_plan_id: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub total_price: String,
    pub price_per_person: String,
    pub participants: i32,
    pub special_requirements: Option<String>,
    pub refund_amount: String,
    pub amount_paid: Option<String>,
    pub remaining_amount: Option<String>,
    pub payment_deadline: Option<NaiveDateTime>,
    pub status: String,
    pub payment_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for guests.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::guests)]
#[diesel(belongs_to(BookingDB, foreign_key = booking_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GuestDB {
    pub id: String,
    pub booking_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub is_team_lead: bool,
}

impl GuestDB {
    pub fn into_domain(self) -> Guest {
        Guest {
            id: self.id,
            booking_id: self.booking_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            is_team_lead: self.is_team_lead,
        }
    }

    pub fn from_domain(guest: &Guest) -> Self {
        Self {
            id: guest.id.clone(),
            booking_id: guest.booking_id.clone(),
            first_name: guest.first_name.clone(),
            last_name: guest.last_name.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            is_team_lead: guest.is_team_lead,
        }
    }
}

impl BookingDB {
    /// Assembles the domain booking from its row and guest rows.
    pub fn into_domain(self, guest_rows: Vec<GuestDB>) -> Result<Booking> {
        let status = BookingStatus::parse(&self.status).ok_or_else(|| {
            Error::Database(DatabaseError::Internal(format!(
                "Unknown booking status '{}' on booking {}",
                self.status, self.id
            )))
        })?;
        let payment_status = PaymentStatus::parse(&self.payment_status).ok_or_else(|| {
            Error::Database(DatabaseError::Internal(format!(
                "Unknown payment status '{}' on booking {}",
                self.payment_status, self.id
            )))
        })?;

        Ok(Booking {
            total_price: parse_money(&self.total_price, "bookings.total_price")?,
            price_per_person: parse_money(&self.price_per_person, "bookings.price_per_person")?,
            refund_amount: parse_money(&self.refund_amount, "bookings.refund_amount")?,
            amount_paid: parse_money_opt(self.amount_paid.as_deref(), "bookings.amount_paid")?,
            remaining_amount: parse_money_opt(
                self.remaining_amount.as_deref(),
                "bookings.remaining_amount",
            )?,
            id: self.id,
            user_id: self.user_id,
            travel_plan_id: self.travel_plan_id,
            start_date: self.start_date,
            end_date: self.end_date,
            participants: self.participants,
            special_requirements: self.special_requirements,
            payment_deadline: self.payment_deadline,
            status,
            payment_status,
            guests: guest_rows.into_iter().map(GuestDB::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
