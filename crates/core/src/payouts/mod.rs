//! Payouts module - domain models, services, and traits.

mod payouts_model;
mod payouts_service;
mod payouts_traits;

pub use payouts_model::{split_installments, Installment, InstallmentKind, NewPayout, Payout};
pub use payouts_service::PayoutService;
pub use payouts_traits::{PayoutRepositoryTrait, PayoutServiceTrait};
