//! Guest-list validation for booking creation.
//!
//! Errors are collected field by field (`guests.<index>.<field>`) and
//! returned all at once, so the checkout form can highlight every problem in
//! a single round trip instead of failing on the first.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::bookings::NewGuest;
use crate::errors::ValidationError;
use crate::{Error, Result};

lazy_static! {
    /// Letters, spaces, hyphens, apostrophes; 2-50 characters, starting with a letter.
    static ref NAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z' \-]{1,49}$").expect("Invalid regex pattern");

    /// Structural email check; deliverability is the mail provider's problem.
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex pattern");

    /// 10-20 digits with an optional leading +.
    static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9]{10,20}$").expect("Invalid regex pattern");
}

/// One field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Dotted path into the submitted form, e.g. `guests.2.phone`.
    pub field: String,
    pub message: String,
}

/// Every guest-list problem found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestValidationErrors {
    pub errors: Vec<FieldError>,
}

impl std::fmt::Display for GuestValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for GuestValidationErrors {}

/// Validates a guest list against the declared participant count.
///
/// Collects every failure before rejecting; a clean list returns `Ok(())`.
pub fn validate_guest_list(
    guests: &[NewGuest],
    participants: i32,
) -> std::result::Result<(), GuestValidationErrors> {
    let mut errors = Vec::new();

    if guests.len() != participants.max(0) as usize {
        errors.push(FieldError {
            field: "participants".to_string(),
            message: format!(
                "Guest list has {} entries but {} participants were declared",
                guests.len(),
                participants
            ),
        });
    }

    for (index, guest) in guests.iter().enumerate() {
        if !NAME_REGEX.is_match(guest.first_name.trim()) {
            errors.push(FieldError {
                field: format!("guests.{index}.firstName"),
                message: "First name must be 2-50 letters, spaces, hyphens, or apostrophes"
                    .to_string(),
            });
        }
        if !NAME_REGEX.is_match(guest.last_name.trim()) {
            errors.push(FieldError {
                field: format!("guests.{index}.lastName"),
                message: "Last name must be 2-50 letters, spaces, hyphens, or apostrophes"
                    .to_string(),
            });
        }
        if !EMAIL_REGEX.is_match(guest.email.trim()) {
            errors.push(FieldError {
                field: format!("guests.{index}.email"),
                message: "Enter a valid email address".to_string(),
            });
        }
        if !PHONE_REGEX.is_match(guest.phone.trim()) {
            errors.push(FieldError {
                field: format!("guests.{index}.phone"),
                message: "Phone must be 10-20 digits, optionally starting with +".to_string(),
            });
        }
    }

    let leads: Vec<usize> = guests
        .iter()
        .enumerate()
        .filter(|(_, g)| g.is_team_lead)
        .map(|(i, _)| i)
        .collect();

    match leads.len() {
        1 => {}
        0 => errors.push(FieldError {
            field: "guests.teamLead".to_string(),
            message: "One guest must be designated as team lead".to_string(),
        }),
        _ => {
            // Flag every extra lead so the form can show where.
            for index in &leads[1..] {
                errors.push(FieldError {
                    field: format!("guests.{index}.isTeamLead"),
                    message: "Only one team lead is allowed".to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(GuestValidationErrors { errors })
    }
}

/// Makes the guest at `index` the team lead, un-setting every other guest.
///
/// Single-select semantics: the previous lead is cleared in the same pass, so
/// the exactly-one invariant holds on exit.
pub fn designate_team_lead(guests: &mut [NewGuest], index: usize) -> Result<()> {
    if index >= guests.len() {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "No guest at position {index}"
        ))));
    }
    for (i, guest) in guests.iter_mut().enumerate() {
        guest.is_team_lead = i == index;
    }
    Ok(())
}
