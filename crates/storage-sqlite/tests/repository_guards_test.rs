//! Integration tests for the conditional-update guards against a real
//! SQLite file. These are the races the admin screens can actually lose:
//! double mark-paid, double refund, settling a cancelled booking.

use std::sync::Arc;

use chrono::{Duration, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use wayfare_core::bookings::{BookingRepositoryTrait, NewBooking, NewGuest};
use wayfare_core::payouts::{split_installments, InstallmentKind, Payout, PayoutRepositoryTrait};
use wayfare_core::statuses::{BookingStatus, InstallmentStatus, PaymentStatus};
use wayfare_core::Error;
use wayfare_storage_sqlite::bookings::BookingRepository;
use wayfare_storage_sqlite::payouts::PayoutRepository;
use wayfare_storage_sqlite::schema::{travel_plans, users};
use wayfare_storage_sqlite::{create_pool, get_connection, init, run_migrations, spawn_writer};

/// Seeds the traveler, the host, and one plan the bookings hang off.
fn seed(pool: &Arc<wayfare_storage_sqlite::DbPool>) {
    let mut conn = get_connection(pool).expect("connection");
    let now = Utc::now().naive_utc();
    diesel::insert_into(users::table)
        .values(vec![
            (
                users::id.eq("usr_1"),
                users::name.eq("Asha Rao"),
                users::email.eq("asha@example.com"),
                users::role.eq("USER"),
                users::created_at.eq(now),
                users::updated_at.eq(now),
            ),
            (
                users::id.eq("hst_1"),
                users::name.eq("Lena Paul"),
                users::email.eq("lena@example.com"),
                users::role.eq("HOST"),
                users::created_at.eq(now),
                users::updated_at.eq(now),
            ),
        ])
        .execute(&mut conn)
        .expect("seed users");
    diesel::insert_into(travel_plans::table)
        .values((
            travel_plans::id.eq("pln_1"),
            travel_plans::host_id.eq("hst_1"),
            travel_plans::title.eq("Backwaters of Kerala"),
            travel_plans::country.eq("India"),
            travel_plans::no_of_days.eq(3),
            travel_plans::price.eq("5000"),
            travel_plans::max_participants.eq(12),
            travel_plans::status.eq("ACTIVE"),
            travel_plans::approved_at.eq(Some(now)),
            travel_plans::created_at.eq(now),
            travel_plans::updated_at.eq(now),
        ))
        .execute(&mut conn)
        .expect("seed plan");
}

fn setup() -> (tempfile::TempDir, Arc<BookingRepository>, Arc<PayoutRepository>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("wayfare.db");
    let db_path = init(db_path.to_str().expect("utf-8 path")).expect("init db");
    let pool = create_pool(&db_path).expect("pool");
    run_migrations(&pool).expect("migrations");
    seed(&pool);
    let writer = spawn_writer((*pool).clone());
    let bookings = Arc::new(BookingRepository::new(pool.clone(), writer.clone()));
    let payouts = Arc::new(PayoutRepository::new(pool, writer));
    (dir, bookings, payouts)
}

fn new_booking() -> NewBooking {
    let start = Utc::now().naive_utc() + Duration::days(20);
    NewBooking {
        id: None,
        user_id: "usr_1".to_string(),
        travel_plan_id: "pln_1".to_string(),
        start_date: start,
        end_date: start + Duration::days(3),
        price_per_person: Decimal::from(5000),
        participants: 2,
        special_requirements: None,
        payment_deadline: Some(Utc::now().naive_utc() + Duration::days(2)),
        guests: vec![
            NewGuest {
                first_name: "Asha".to_string(),
                last_name: "Rao".to_string(),
                email: "asha@example.com".to_string(),
                phone: "+919876543210".to_string(),
                is_team_lead: true,
            },
            NewGuest {
                first_name: "Dev".to_string(),
                last_name: "Menon".to_string(),
                email: "dev@example.com".to_string(),
                phone: "9876543211".to_string(),
                is_team_lead: false,
            },
        ],
    }
}

fn sample_payout(booking_id: &str) -> Payout {
    let now = Utc::now().naive_utc();
    let (first, second) =
        split_installments(Decimal::from(9000), 50, now, now + Duration::days(14))
            .expect("split");
    Payout {
        id: uuid::Uuid::new_v4().to_string(),
        booking_id: booking_id.to_string(),
        host_id: "hst_1".to_string(),
        host_name: "Lena Paul".to_string(),
        host_email: "lena@example.com".to_string(),
        trip_title: "Backwaters of Kerala".to_string(),
        user_id: "usr_1".to_string(),
        user_name: "Asha Rao".to_string(),
        user_email: "asha@example.com".to_string(),
        trip_start_date: now + Duration::days(20),
        trip_end_date: now + Duration::days(23),
        total_amount: Decimal::from(9000),
        first,
        second,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn booking_round_trips_with_guests_and_decimals() {
    let (_dir, bookings, _) = setup();
    let created = bookings.create(new_booking()).await.unwrap();

    assert_eq!(created.total_price, Decimal::from(10000));
    assert_eq!(created.payment_status, PaymentStatus::Pending);
    assert_eq!(created.guests.len(), 2);
    // Team lead sorts first.
    assert!(created.guests[0].is_team_lead);

    let fetched = bookings.get_by_id(&created.id).unwrap();
    assert_eq!(fetched.total_price, created.total_price);
    assert_eq!(fetched.guests.len(), 2);
}

#[tokio::test]
async fn settle_then_cancel_then_refund_walks_the_guards() {
    let (_dir, bookings, _) = setup();
    let created = bookings.create(new_booking()).await.unwrap();

    let paid = bookings
        .settle_payment(
            &created.id,
            Decimal::from(10000),
            Decimal::ZERO,
            PaymentStatus::FullyPaid,
        )
        .await
        .unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::FullyPaid);
    assert_eq!(paid.status, BookingStatus::Confirmed);

    // Refund before cancellation: guard rejects.
    let err = bookings.mark_refunded(&created.id).await.unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));

    let cancelled = bookings.cancel(&created.id, Decimal::from(5000)).await.unwrap();
    assert_eq!(cancelled.payment_status, PaymentStatus::Cancelled);
    assert_eq!(cancelled.refund_amount, Decimal::from(5000));

    // Second cancel loses the FULLY_PAID guard.
    let err = bookings.cancel(&created.id, Decimal::from(5000)).await.unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));

    // A settlement can no longer land on the cancelled booking.
    let err = bookings
        .settle_payment(
            &created.id,
            Decimal::from(10000),
            Decimal::ZERO,
            PaymentStatus::FullyPaid,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));

    let refunded = bookings.mark_refunded(&created.id).await.unwrap();
    assert_eq!(refunded.payment_status, PaymentStatus::Refunded);
    assert_eq!(refunded.status, BookingStatus::Refunded);
}

#[tokio::test]
async fn needing_payout_view_is_a_set_difference() {
    let (_dir, bookings, payouts) = setup();
    let first = bookings.create(new_booking()).await.unwrap();
    let second = bookings.create(new_booking()).await.unwrap();

    for booking in [&first, &second] {
        bookings
            .settle_payment(
                &booking.id,
                Decimal::from(10000),
                Decimal::ZERO,
                PaymentStatus::FullyPaid,
            )
            .await
            .unwrap();
    }
    assert_eq!(bookings.list_needing_payout().unwrap().len(), 2);

    payouts.insert(sample_payout(&first.id)).await.unwrap();
    assert!(payouts.exists_for_booking(&first.id).unwrap());

    let needing = bookings.list_needing_payout().unwrap();
    assert_eq!(needing.len(), 1);
    assert_eq!(needing[0].id, second.id);
}

#[tokio::test]
async fn installment_mark_paid_is_guarded_per_installment() {
    let (_dir, bookings, payouts) = setup();
    let booking = bookings.create(new_booking()).await.unwrap();
    bookings
        .settle_payment(
            &booking.id,
            Decimal::from(10000),
            Decimal::ZERO,
            PaymentStatus::FullyPaid,
        )
        .await
        .unwrap();
    let payout = payouts.insert(sample_payout(&booking.id)).await.unwrap();

    let updated = payouts
        .mark_installment_paid(&payout.id, InstallmentKind::First)
        .await
        .unwrap();
    assert_eq!(updated.first.status, InstallmentStatus::Paid);
    assert_eq!(updated.second.status, InstallmentStatus::Pending);

    // The repeat matches zero rows; PAID stands.
    let err = payouts
        .mark_installment_paid(&payout.id, InstallmentKind::First)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
    let current = payouts.get_by_id(&payout.id).unwrap();
    assert_eq!(current.first.status, InstallmentStatus::Paid);

    // The second installment has its own guard.
    let updated = payouts
        .mark_installment_paid(&payout.id, InstallmentKind::Second)
        .await
        .unwrap();
    assert_eq!(updated.second.status, InstallmentStatus::Paid);
    assert_eq!(
        updated.first.amount + updated.second.amount,
        updated.total_amount
    );
}

#[tokio::test]
async fn overdue_sweep_only_touches_lapsed_unsettled_rows() {
    let (_dir, bookings, _) = setup();

    let mut lapsed = new_booking();
    lapsed.payment_deadline = Some(Utc::now().naive_utc() - Duration::days(1));
    let lapsed = bookings.create(lapsed).await.unwrap();

    let mut fresh = new_booking();
    fresh.payment_deadline = Some(Utc::now().naive_utc() + Duration::days(5));
    let fresh = bookings.create(fresh).await.unwrap();

    let mut no_deadline = new_booking();
    no_deadline.payment_deadline = None;
    let no_deadline = bookings.create(no_deadline).await.unwrap();

    let flipped = bookings.sweep_overdue(Utc::now().naive_utc()).await.unwrap();
    assert_eq!(flipped, 1);
    assert_eq!(
        bookings.get_by_id(&lapsed.id).unwrap().payment_status,
        PaymentStatus::Overdue
    );
    assert_eq!(
        bookings.get_by_id(&fresh.id).unwrap().payment_status,
        PaymentStatus::Pending
    );
    assert_eq!(
        bookings.get_by_id(&no_deadline.id).unwrap().payment_status,
        PaymentStatus::Pending
    );

    // Idempotent.
    assert_eq!(
        bookings.sweep_overdue(Utc::now().naive_utc()).await.unwrap(),
        0
    );
}
