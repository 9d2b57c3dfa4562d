//! Bookings module - domain models, calculators, services, and traits.

mod bookings_model;
mod bookings_service;
mod bookings_traits;
mod guests;
mod payment_status;
mod refund;
mod summary;

pub use bookings_model::{Booking, Guest, NewBooking, NewGuest, PaymentEvent};
pub use bookings_service::BookingService;
pub use bookings_traits::{BookingRepositoryTrait, BookingServiceTrait};
pub use guests::{
    designate_team_lead, validate_guest_list, FieldError, GuestValidationErrors,
};
pub use payment_status::{
    effective_payment_status, evaluate_payment_status, evaluate_payment_status_with_display,
    PaymentSnapshot,
};
pub use refund::{compute_refund, refund_percentage, RefundQuote, MIN_CANCELLATION_NOTICE_DAYS};
pub use summary::{summarize, BookingSummary};
