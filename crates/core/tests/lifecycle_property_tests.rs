//! Property-based tests for the booking aggregator, refund tiers, and
//! payout splits, using the `proptest` crate for random case generation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use wayfare_core::bookings::{
    compute_refund, refund_percentage, summarize, Booking,
};
use wayfare_core::payouts::split_installments;
use wayfare_core::statuses::{BookingStatus, PaymentStatus};

// =============================================================================
// Generators
// =============================================================================

fn base_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn arb_payment_status() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Pending),
        Just(PaymentStatus::PartiallyPaid),
        Just(PaymentStatus::FullyPaid),
        Just(PaymentStatus::Overdue),
        Just(PaymentStatus::Cancelled),
        Just(PaymentStatus::Refunded),
    ]
}

/// A booking with arbitrary status, start offset, and paid fraction.
fn arb_booking() -> impl Strategy<Value = Booking> {
    (
        arb_payment_status(),
        -60i64..120,            // start date offset in days
        1u32..=8,               // participants
        100u32..100_000,        // price per person, whole rupees
        0u32..=100,             // paid fraction of total, percent
        proptest::option::of(-30i64..30), // deadline offset
    )
        .prop_map(|(status, start_offset, participants, price, paid_pct, deadline)| {
            let now = base_now();
            let start = now + Duration::days(start_offset);
            let total = Decimal::from(price) * Decimal::from(participants);
            let paid = total * Decimal::from(paid_pct) / Decimal::from(100);
            Booking {
                id: "bkg".to_string(),
                user_id: "usr".to_string(),
                travel_plan_id: "pln".to_string(),
                start_date: start,
                end_date: start + Duration::days(3),
                total_price: total,
                price_per_person: Decimal::from(price),
                participants: participants as i32,
                special_requirements: None,
                refund_amount: Decimal::ZERO,
                amount_paid: (paid_pct > 0).then_some(paid),
                remaining_amount: (paid_pct > 0).then_some(total - paid),
                payment_deadline: deadline.map(|d| now + Duration::days(d)),
                status: BookingStatus::Pending,
                payment_status: status,
                guests: Vec::new(),
                created_at: now,
                updated_at: now,
            }
        })
}

// =============================================================================
// Property tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Per-status counts always partition the collection: their sum equals
    /// the ALL bucket equals the input length.
    #[test]
    fn prop_aggregator_counts_partition_the_bookings(
        bookings in proptest::collection::vec(arb_booking(), 0..40)
    ) {
        let summary = summarize(&bookings, base_now());
        let per_status: usize = PaymentStatus::ALL
            .into_iter()
            .map(|s| summary.count(s))
            .sum();
        prop_assert_eq!(per_status, summary.all);
        prop_assert_eq!(summary.all, bookings.len());
        // The buckets never exceed the whole.
        prop_assert!(summary.upcoming <= summary.all);
        prop_assert!(summary.past <= summary.all);
    }

    /// More notice never shrinks the refund tier.
    #[test]
    fn prop_refund_tier_is_monotonic(days in -10i64..400, extra in 0i64..100) {
        prop_assert!(refund_percentage(days + extra) >= refund_percentage(days));
    }

    /// The quoted refund never exceeds what the traveler actually paid.
    #[test]
    fn prop_refund_never_exceeds_amount_paid(booking in arb_booking()) {
        let quote = compute_refund(&booking, base_now());
        if quote.allowed {
            let base = booking.amount_paid.unwrap_or(booking.total_price);
            prop_assert!(quote.refund_amount <= base);
            prop_assert!(quote.refund_amount >= Decimal::ZERO);
        } else {
            prop_assert_eq!(quote.refund_amount, Decimal::ZERO);
            prop_assert_eq!(quote.refund_percentage, 0u32);
        }
    }

    /// Only fully paid bookings ever get an allowed quote.
    #[test]
    fn prop_refund_gate_requires_full_payment(booking in arb_booking()) {
        let quote = compute_refund(&booking, base_now());
        if booking.payment_status != PaymentStatus::FullyPaid {
            prop_assert!(!quote.allowed);
        }
    }

    /// Installment splits conserve money exactly for any total and percent.
    #[test]
    fn prop_installment_split_conserves_money(
        rupees in 1u64..10_000_000,
        paise in 0u32..100,
        first_percent in 1u32..100,
    ) {
        let total = Decimal::from(rupees) + Decimal::new(paise as i64, 2);
        let due = base_now();
        let (first, second) =
            split_installments(total, first_percent, due, due + Duration::days(14)).unwrap();
        prop_assert_eq!(first.amount + second.amount, total);
        prop_assert_eq!(first.percent + second.percent, 100u32);
        prop_assert!(first.amount >= Decimal::ZERO);
        prop_assert!(second.amount >= Decimal::ZERO);
    }
}
