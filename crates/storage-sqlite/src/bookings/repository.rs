use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{bookings, guests, payouts, travel_plans};

use super::model::{BookingDB, GuestDB};
use wayfare_core::bookings::{Booking, BookingRepositoryTrait, NewBooking};
use wayfare_core::errors::{DatabaseError, Error, Result};
use wayfare_core::statuses::{BookingStatus, PaymentStatus};

/// Repository for managing booking data in the database.
pub struct BookingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BookingRepository {
    /// Creates a new BookingRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Loads one booking with its guests. Shared by reads and write jobs.
fn load_booking(conn: &mut SqliteConnection, booking_id: &str) -> Result<Booking> {
    let row = bookings::table
        .find(booking_id)
        .select(BookingDB::as_select())
        .first::<BookingDB>(conn)
        .into_core()?;
    let guest_rows = guests::table
        .filter(guests::booking_id.eq(booking_id))
        .order(guests::is_team_lead.desc())
        .select(GuestDB::as_select())
        .load::<GuestDB>(conn)
        .into_core()?;
    row.into_domain(guest_rows)
}

/// Attaches guest rows to a page of booking rows.
fn assemble(conn: &mut SqliteConnection, rows: Vec<BookingDB>) -> Result<Vec<Booking>> {
    let guest_rows = GuestDB::belonging_to(&rows)
        .select(GuestDB::as_select())
        .load::<GuestDB>(conn)
        .into_core()?;
    let grouped = guest_rows.grouped_by(&rows);
    rows.into_iter()
        .zip(grouped)
        .map(|(row, row_guests)| row.into_domain(row_guests))
        .collect()
}

/// NotFound when the row is missing, Precondition when it exists but the
/// guard did not match. Callers see exactly why their update lost.
fn stale_or_missing(conn: &mut SqliteConnection, booking_id: &str, requirement: &str) -> Error {
    match bookings::table
        .filter(bookings::id.eq(booking_id))
        .count()
        .get_result::<i64>(conn)
    {
        Ok(0) => Error::Database(DatabaseError::NotFound(format!(
            "Booking {booking_id} not found"
        ))),
        Ok(_) => Error::Precondition(format!(
            "Booking {booking_id} is not {requirement}; refresh and retry"
        )),
        Err(e) => crate::errors::StorageError::from(e).into(),
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn create(&self, new_booking: NewBooking) -> Result<Booking> {
        let now = Utc::now().naive_utc();
        let booking_id = new_booking
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let total_price = new_booking.total_price();

        let booking_row = BookingDB {
            id: booking_id.clone(),
            user_id: new_booking.user_id,
            travel_plan_id: new_booking.travel_plan_id,
            start_date: new_booking.start_date,
            end_date: new_booking.end_date,
            total_price: total_price.to_string(),
            price_per_person: new_booking.price_per_person.to_string(),
            participants: new_booking.participants,
            special_requirements: new_booking.special_requirements,
            refund_amount: Decimal::ZERO.to_string(),
            amount_paid: None,
            remaining_amount: None,
            payment_deadline: new_booking.payment_deadline,
            status: BookingStatus::Pending.as_str().to_string(),
            payment_status: PaymentStatus::Pending.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        let guest_rows: Vec<GuestDB> = new_booking
            .guests
            .into_iter()
            .map(|g| GuestDB {
                id: uuid::Uuid::new_v4().to_string(),
                booking_id: booking_id.clone(),
                first_name: g.first_name,
                last_name: g.last_name,
                email: g.email,
                phone: g.phone,
                is_team_lead: g.is_team_lead,
            })
            .collect();

        self.writer
            .exec(move |conn| {
                diesel::insert_into(bookings::table)
                    .values(&booking_row)
                    .execute(conn)
                    .into_core()?;
                diesel::insert_into(guests::table)
                    .values(&guest_rows)
                    .execute(conn)
                    .into_core()?;
                load_booking(conn, &booking_row.id)
            })
            .await
    }

    fn get_by_id(&self, booking_id: &str) -> Result<Booking> {
        let mut conn = get_connection(&self.pool)?;
        load_booking(&mut conn, booking_id)
    }

    fn list_all(&self) -> Result<Vec<Booking>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = bookings::table
            .select(BookingDB::as_select())
            .order(bookings::created_at.desc())
            .load::<BookingDB>(&mut conn)
            .into_core()?;
        assemble(&mut conn, rows)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = bookings::table
            .filter(bookings::user_id.eq(user_id))
            .select(BookingDB::as_select())
            .order(bookings::start_date.desc())
            .load::<BookingDB>(&mut conn)
            .into_core()?;
        assemble(&mut conn, rows)
    }

    fn list_for_host(&self, host_id: &str) -> Result<Vec<Booking>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = bookings::table
            .inner_join(travel_plans::table)
            .filter(travel_plans::host_id.eq(host_id))
            .select(BookingDB::as_select())
            .order(bookings::start_date.desc())
            .load::<BookingDB>(&mut conn)
            .into_core()?;
        assemble(&mut conn, rows)
    }

    fn list_needing_payout(&self) -> Result<Vec<Booking>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = bookings::table
            .left_join(payouts::table)
            .filter(payouts::id.is_null())
            .filter(bookings::payment_status.eq(PaymentStatus::FullyPaid.as_str()))
            .select(BookingDB::as_select())
            .order(bookings::start_date.asc())
            .load::<BookingDB>(&mut conn)
            .into_core()?;
        assemble(&mut conn, rows)
    }

    async fn settle_payment(
        &self,
        booking_id: &str,
        amount_paid: Decimal,
        remaining_amount: Decimal,
        payment_status: PaymentStatus,
    ) -> Result<Booking> {
        let booking_id = booking_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                // Guarded on the statuses a settlement may leave, so a
                // concurrent cancellation cannot be overwritten.
                let affected = diesel::update(
                    bookings::table
                        .filter(bookings::id.eq(&booking_id))
                        .filter(bookings::payment_status.eq_any([
                            PaymentStatus::Pending.as_str(),
                            PaymentStatus::PartiallyPaid.as_str(),
                            PaymentStatus::Overdue.as_str(),
                        ])),
                )
                .set((
                    bookings::amount_paid.eq(Some(amount_paid.to_string())),
                    bookings::remaining_amount.eq(Some(remaining_amount.to_string())),
                    bookings::payment_status.eq(payment_status.as_str()),
                    bookings::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(stale_or_missing(conn, &booking_id, "awaiting payment"));
                }

                // A completed payment confirms a still-pending booking.
                if payment_status == PaymentStatus::FullyPaid {
                    diesel::update(
                        bookings::table
                            .filter(bookings::id.eq(&booking_id))
                            .filter(bookings::status.eq(BookingStatus::Pending.as_str())),
                    )
                    .set(bookings::status.eq(BookingStatus::Confirmed.as_str()))
                    .execute(conn)
                    .into_core()?;
                }

                load_booking(conn, &booking_id)
            })
            .await
    }

    async fn cancel(&self, booking_id: &str, refund_amount: Decimal) -> Result<Booking> {
        let booking_id = booking_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    bookings::table
                        .filter(bookings::id.eq(&booking_id))
                        .filter(bookings::payment_status.eq(PaymentStatus::FullyPaid.as_str())),
                )
                .set((
                    bookings::status.eq(BookingStatus::Cancelled.as_str()),
                    bookings::payment_status.eq(PaymentStatus::Cancelled.as_str()),
                    bookings::refund_amount.eq(refund_amount.to_string()),
                    bookings::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(stale_or_missing(conn, &booking_id, "fully paid"));
                }
                load_booking(conn, &booking_id)
            })
            .await
    }

    async fn mark_refunded(&self, booking_id: &str) -> Result<Booking> {
        let booking_id = booking_id.to_string();
        self.writer
            .exec(move |conn| {
                // One conditional row update: the dashboard can never observe
                // a booking that left CANCELLED without entering REFUNDED.
                let affected = diesel::update(
                    bookings::table
                        .filter(bookings::id.eq(&booking_id))
                        .filter(bookings::payment_status.eq(PaymentStatus::Cancelled.as_str())),
                )
                .set((
                    bookings::status.eq(BookingStatus::Refunded.as_str()),
                    bookings::payment_status.eq(PaymentStatus::Refunded.as_str()),
                    bookings::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(stale_or_missing(
                        conn,
                        &booking_id,
                        "cancelled and awaiting refund",
                    ));
                }
                load_booking(conn, &booking_id)
            })
            .await
    }

    async fn sweep_overdue(&self, now: NaiveDateTime) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                diesel::update(
                    bookings::table
                        .filter(bookings::payment_status.eq_any([
                            PaymentStatus::Pending.as_str(),
                            PaymentStatus::PartiallyPaid.as_str(),
                        ]))
                        .filter(bookings::payment_deadline.lt(now)),
                )
                .set((
                    bookings::payment_status.eq(PaymentStatus::Overdue.as_str()),
                    bookings::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .into_core()
            })
            .await
    }
}
