//! Shared status vocabulary for the marketplace.
//!
//! Every lifecycle state in the system is defined here once: the enum, its
//! wire form, its display tuple, and its transition table. Services and the
//! storage layer import these instead of re-declaring string unions, and an
//! illegal transition (e.g. REFUNDED back to PENDING) is rejected by
//! construction rather than by convention.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Display mapping
// =============================================================================

/// Canonical display tuple for a status value.
///
/// The icon names and color classes are the ones the dashboards render;
/// keeping the mapping here guarantees admin, host, and traveler views
/// stay visually consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDisplay {
    pub icon: &'static str,
    pub color: &'static str,
    pub label: &'static str,
}

// =============================================================================
// Transition errors
// =============================================================================

/// Rejected status transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{entity} cannot move from {from} to {to}")]
pub struct TransitionError {
    pub entity: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

// =============================================================================
// Payment status
// =============================================================================

/// Financial settlement state of a booking, independent of its
/// confirmation/cancellation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    PartiallyPaid,
    FullyPaid,
    Overdue,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    /// All values, in display order. Aggregation iterates this.
    pub const ALL: [PaymentStatus; 6] = [
        PaymentStatus::Pending,
        PaymentStatus::PartiallyPaid,
        PaymentStatus::FullyPaid,
        PaymentStatus::Overdue,
        PaymentStatus::Cancelled,
        PaymentStatus::Refunded,
    ];

    /// Returns the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::PartiallyPaid => "PARTIALLY_PAID",
            PaymentStatus::FullyPaid => "FULLY_PAID",
            PaymentStatus::Overdue => "OVERDUE",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }

    /// Parses the wire/storage form.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    /// Statuses this one may legally move to.
    ///
    /// OVERDUE can still settle: a late gateway confirmation is accepted
    /// after the deadline has passed.
    pub fn allowed_next(&self) -> &'static [PaymentStatus] {
        match self {
            PaymentStatus::Pending => &[
                PaymentStatus::PartiallyPaid,
                PaymentStatus::FullyPaid,
                PaymentStatus::Overdue,
                PaymentStatus::Cancelled,
            ],
            PaymentStatus::PartiallyPaid => &[
                PaymentStatus::FullyPaid,
                PaymentStatus::Overdue,
                PaymentStatus::Cancelled,
            ],
            PaymentStatus::FullyPaid => &[PaymentStatus::Cancelled],
            PaymentStatus::Overdue => &[
                PaymentStatus::PartiallyPaid,
                PaymentStatus::FullyPaid,
                PaymentStatus::Cancelled,
            ],
            PaymentStatus::Cancelled => &[PaymentStatus::Refunded],
            PaymentStatus::Refunded => &[],
        }
    }

    /// Whether moving to `next` is legal.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    /// Validates the move to `next`, returning it on success.
    pub fn transition_to(&self, next: PaymentStatus) -> Result<PaymentStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                entity: "payment status",
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }

    /// True for states no payment event can move the booking out of.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Cancelled | PaymentStatus::Refunded)
    }

    /// Canonical display tuple for this status.
    pub fn display(&self) -> StatusDisplay {
        match self {
            PaymentStatus::Pending => StatusDisplay {
                icon: "clock",
                color: "text-yellow-600",
                label: "Payment Pending",
            },
            PaymentStatus::PartiallyPaid => StatusDisplay {
                icon: "circle-dollar-sign",
                color: "text-blue-600",
                label: "Partially Paid",
            },
            PaymentStatus::FullyPaid => StatusDisplay {
                icon: "check-circle",
                color: "text-green-600",
                label: "Fully Paid",
            },
            PaymentStatus::Overdue => StatusDisplay {
                icon: "alert-triangle",
                color: "text-red-600",
                label: "Overdue",
            },
            PaymentStatus::Cancelled => StatusDisplay {
                icon: "x-circle",
                color: "text-gray-500",
                label: "Cancelled",
            },
            PaymentStatus::Refunded => StatusDisplay {
                icon: "rotate-ccw",
                color: "text-purple-600",
                label: "Refunded",
            },
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Booking status
// =============================================================================

/// Confirmation lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Refunded,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Refunded => "REFUNDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn allowed_next(&self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[BookingStatus::Cancelled],
            BookingStatus::Cancelled => &[BookingStatus::Refunded],
            BookingStatus::Refunded => &[],
        }
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn transition_to(&self, next: BookingStatus) -> Result<BookingStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                entity: "booking status",
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }

    pub fn display(&self) -> StatusDisplay {
        match self {
            BookingStatus::Pending => StatusDisplay {
                icon: "clock",
                color: "text-yellow-600",
                label: "Pending",
            },
            BookingStatus::Confirmed => StatusDisplay {
                icon: "check-circle",
                color: "text-green-600",
                label: "Confirmed",
            },
            BookingStatus::Cancelled => StatusDisplay {
                icon: "x-circle",
                color: "text-gray-500",
                label: "Cancelled",
            },
            BookingStatus::Refunded => StatusDisplay {
                icon: "rotate-ccw",
                color: "text-purple-600",
                label: "Refunded",
            },
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Payout installment status
// =============================================================================

/// Settlement state of one payout installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
    Failed,
}

impl InstallmentStatus {
    pub const ALL: [InstallmentStatus; 4] = [
        InstallmentStatus::Pending,
        InstallmentStatus::Paid,
        InstallmentStatus::Cancelled,
        InstallmentStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallmentStatus::Pending => "PENDING",
            InstallmentStatus::Paid => "PAID",
            InstallmentStatus::Cancelled => "CANCELLED",
            InstallmentStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    /// PAID never auto-reverts; a FAILED disbursement may be retried.
    pub fn allowed_next(&self) -> &'static [InstallmentStatus] {
        match self {
            InstallmentStatus::Pending => &[
                InstallmentStatus::Paid,
                InstallmentStatus::Cancelled,
                InstallmentStatus::Failed,
            ],
            InstallmentStatus::Failed => &[InstallmentStatus::Paid, InstallmentStatus::Cancelled],
            InstallmentStatus::Paid => &[],
            InstallmentStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: InstallmentStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn transition_to(
        &self,
        next: InstallmentStatus,
    ) -> Result<InstallmentStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                entity: "installment status",
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }

    pub fn display(&self) -> StatusDisplay {
        match self {
            InstallmentStatus::Pending => StatusDisplay {
                icon: "clock",
                color: "text-yellow-600",
                label: "Pending",
            },
            InstallmentStatus::Paid => StatusDisplay {
                icon: "check-circle",
                color: "text-green-600",
                label: "Paid",
            },
            InstallmentStatus::Cancelled => StatusDisplay {
                icon: "x-circle",
                color: "text-gray-500",
                label: "Cancelled",
            },
            InstallmentStatus::Failed => StatusDisplay {
                icon: "alert-triangle",
                color: "text-red-600",
                label: "Failed",
            },
        }
    }
}

impl std::fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Travel plan status
// =============================================================================

/// Publication state of a travel plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    #[default]
    Draft,
    Inactive,
    Active,
}

impl PlanStatus {
    pub const ALL: [PlanStatus; 3] = [PlanStatus::Draft, PlanStatus::Inactive, PlanStatus::Active];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "DRAFT",
            PlanStatus::Inactive => "INACTIVE",
            PlanStatus::Active => "ACTIVE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    /// DRAFT leaves draft only through approval; an approved plan may be
    /// toggled between ACTIVE and INACTIVE by its host.
    pub fn allowed_next(&self) -> &'static [PlanStatus] {
        match self {
            PlanStatus::Draft => &[PlanStatus::Inactive, PlanStatus::Active],
            PlanStatus::Inactive => &[PlanStatus::Active],
            PlanStatus::Active => &[PlanStatus::Inactive],
        }
    }

    pub fn can_transition_to(&self, next: PlanStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn transition_to(&self, next: PlanStatus) -> Result<PlanStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                entity: "plan status",
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// User role
// =============================================================================

/// Role of a user account. Role changes are admin-triggered writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    User,
    Host,
    Admin,
    Support,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::User,
        UserRole::Host,
        UserRole::Admin,
        UserRole::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Host => "HOST",
            UserRole::Admin => "ADMIN",
            UserRole::Support => "SUPPORT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
