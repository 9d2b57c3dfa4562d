//! Database model for payouts.
//!
//! The two domain installments are flattened into `first_*`/`second_*`
//! columns so each can be guarded independently by a conditional update.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::parse_money;
use wayfare_core::errors::{DatabaseError, Error, Result};
use wayfare_core::payouts::{Installment, Payout};
use wayfare_core::statuses::InstallmentStatus;

/// Database model for payouts.
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
#[diesel(table_name = crate::schema::payouts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PayoutDB {
    pub id: String,
    pub booking_id: String,
    pub host_id: String,
    pub host_name: String,
    pub host_email: String,
    pub trip_title: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub trip_start_date: NaiveDateTime,
    pub trip_end_date: NaiveDateTime,
    pub total_amount: String,
    pub first_amount: String,
    pub first_percent: i32,
    pub first_due_date: NaiveDateTime,
    pub first_status: String,
    pub second_amount: String,
    pub second_percent: i32,
    pub second_due_date: NaiveDateTime,
    pub second_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn parse_installment_status(value: &str, payout_id: &str) -> Result<InstallmentStatus> {
    InstallmentStatus::parse(value).ok_or_else(|| {
        Error::Database(DatabaseError::Internal(format!(
            "Unknown installment status '{value}' on payout {payout_id}"
        )))
    })
}

impl PayoutDB {
    pub fn into_domain(self) -> Result<Payout> {
        let first = Installment {
            amount: parse_money(&self.first_amount, "payouts.first_amount")?,
            percent: self.first_percent as u32,
            due_date: self.first_due_date,
            status: parse_installment_status(&self.first_status, &self.id)?,
        };
        let second = Installment {
            amount: parse_money(&self.second_amount, "payouts.second_amount")?,
            percent: self.second_percent as u32,
            due_date: self.second_due_date,
            status: parse_installment_status(&self.second_status, &self.id)?,
        };

        Ok(Payout {
            total_amount: parse_money(&self.total_amount, "payouts.total_amount")?,
            id: self.id,
            booking_id: self.booking_id,
            host_id: self.host_id,
            host_name: self.host_name,
            host_email: self.host_email,
            trip_title: self.trip_title,
            user_id: self.user_id,
            user_name: self.user_name,
            user_email: self.user_email,
            trip_start_date: self.trip_start_date,
            trip_end_date: self.trip_end_date,
            first,
            second,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    pub fn from_domain(payout: &Payout) -> Self {
        Self {
            id: payout.id.clone(),
            booking_id: payout.booking_id.clone(),
            host_id: payout.host_id.clone(),
            host_name: payout.host_name.clone(),
            host_email: payout.host_email.clone(),
            trip_title: payout.trip_title.clone(),
            user_id: payout.user_id.clone(),
            user_name: payout.user_name.clone(),
            user_email: payout.user_email.clone(),
            trip_start_date: payout.trip_start_date,
            trip_end_date: payout.trip_end_date,
            total_amount: payout.total_amount.to_string(),
            first_amount: payout.first.amount.to_string(),
            first_percent: payout.first.percent as i32,
            first_due_date: payout.first.due_date,
            first_status: payout.first.status.as_str().to_string(),
            second_amount: payout.second.amount.to_string(),
            second_percent: payout.second.percent as i32,
            second_due_date: payout.second.due_date,
            second_status: payout.second.status.as_str().to_string(),
            created_at: payout.created_at,
            updated_at: payout.updated_at,
        }
    }
}
