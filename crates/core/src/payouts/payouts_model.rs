//! Payout domain models.
//!
//! A payout is the money owed to a host for one fully paid booking, split
//! into two scheduled installments. The split is exact by construction: the
//! second installment is the remainder, so the two always sum to the total.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::ValidationError;
use crate::statuses::InstallmentStatus;
use crate::{Error, Result};

/// Which of the two installments an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentKind {
    First,
    Second,
}

impl InstallmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallmentKind::First => "first",
            InstallmentKind::Second => "second",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first" => Some(InstallmentKind::First),
            "second" => Some(InstallmentKind::Second),
            _ => None,
        }
    }
}

impl std::fmt::Display for InstallmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One scheduled payment to a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub amount: Decimal,
    /// Share of the payout total, in whole percent.
    pub percent: u32,
    pub due_date: NaiveDateTime,
    pub status: InstallmentStatus,
}

/// Domain model for a host payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
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
    pub total_amount: Decimal,
    pub first: Installment,
    pub second: Installment,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Payout {
    pub fn installment(&self, kind: InstallmentKind) -> &Installment {
        match kind {
            InstallmentKind::First => &self.first,
            InstallmentKind::Second => &self.second,
        }
    }
}

/// Input model for the manual admin "create payout" action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
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
    pub total_amount: Decimal,
    /// Share of the total paid up front, in whole percent. The second
    /// installment takes the rest.
    pub first_percent: u32,
    pub first_due_date: NaiveDateTime,
    pub second_due_date: NaiveDateTime,
}

impl NewPayout {
    /// Validates the payout request.
    pub fn validate(&self) -> Result<()> {
        if self.booking_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "bookingId".to_string(),
            )));
        }
        if self.total_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Payout total must be positive".to_string(),
            )));
        }
        if self.first_percent == 0 || self.first_percent >= 100 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "First installment percent must be between 1 and 99".to_string(),
            )));
        }
        Ok(())
    }
}

/// Splits a payout total into its two PENDING installments.
///
/// The first installment is rounded to display precision; the second is the
/// exact remainder. `first.amount + second.amount == total_amount` holds for
/// every input, and the percents always sum to 100.
pub fn split_installments(
    total_amount: Decimal,
    first_percent: u32,
    first_due_date: NaiveDateTime,
    second_due_date: NaiveDateTime,
) -> Result<(Installment, Installment)> {
    if first_percent == 0 || first_percent >= 100 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "First installment percent must be between 1 and 99".to_string(),
        )));
    }

    let first_amount = (total_amount * Decimal::from(first_percent) / Decimal::from(100))
        .round_dp(DISPLAY_DECIMAL_PRECISION);
    let second_amount = total_amount - first_amount;

    Ok((
        Installment {
            amount: first_amount,
            percent: first_percent,
            due_date: first_due_date,
            status: InstallmentStatus::Pending,
        },
        Installment {
            amount: second_amount,
            percent: 100 - first_percent,
            due_date: second_due_date,
            status: InstallmentStatus::Pending,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn due(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_even_split() {
        let (first, second) = split_installments(dec!(10000), 50, due(1), due(15)).unwrap();
        assert_eq!(first.amount, dec!(5000));
        assert_eq!(second.amount, dec!(5000));
        assert_eq!(first.percent + second.percent, 100);
    }

    #[test]
    fn test_uneven_total_conserves_money() {
        // 30% of 1000.01 is 300.003; rounding must not create or destroy money.
        let (first, second) = split_installments(dec!(1000.01), 30, due(1), due(15)).unwrap();
        assert_eq!(first.amount + second.amount, dec!(1000.01));
        assert_eq!(first.percent, 30);
        assert_eq!(second.percent, 70);
    }

    #[test]
    fn test_installments_start_pending() {
        let (first, second) = split_installments(dec!(500), 40, due(1), due(15)).unwrap();
        assert_eq!(first.status, InstallmentStatus::Pending);
        assert_eq!(second.status, InstallmentStatus::Pending);
    }

    #[test]
    fn test_degenerate_percents_rejected() {
        assert!(split_installments(dec!(500), 0, due(1), due(15)).is_err());
        assert!(split_installments(dec!(500), 100, due(1), due(15)).is_err());
        assert!(split_installments(dec!(500), 150, due(1), due(15)).is_err());
    }
}
