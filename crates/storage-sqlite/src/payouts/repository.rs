use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::payouts;

use super::model::PayoutDB;
use wayfare_core::errors::{DatabaseError, Error, Result};
use wayfare_core::payouts::{InstallmentKind, Payout, PayoutRepositoryTrait};
use wayfare_core::statuses::InstallmentStatus;

/// Repository for managing payout data in the database.
pub struct PayoutRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PayoutRepository {
    /// Creates a new PayoutRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_payout(conn: &mut SqliteConnection, payout_id: &str) -> Result<Payout> {
    payouts::table
        .find(payout_id)
        .select(PayoutDB::as_select())
        .first::<PayoutDB>(conn)
        .into_core()?
        .into_domain()
}

#[async_trait]
impl PayoutRepositoryTrait for PayoutRepository {
    async fn insert(&self, payout: Payout) -> Result<Payout> {
        let row = PayoutDB::from_domain(&payout);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(payouts::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                load_payout(conn, &row.id)
            })
            .await
    }

    fn get_by_id(&self, payout_id: &str) -> Result<Payout> {
        let mut conn = get_connection(&self.pool)?;
        load_payout(&mut conn, payout_id)
    }

    fn list_all(&self) -> Result<Vec<Payout>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = payouts::table
            .select(PayoutDB::as_select())
            .order(payouts::created_at.desc())
            .load::<PayoutDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(PayoutDB::into_domain).collect()
    }

    fn list_for_host(&self, host_id: &str) -> Result<Vec<Payout>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = payouts::table
            .filter(payouts::host_id.eq(host_id))
            .select(PayoutDB::as_select())
            .order(payouts::created_at.desc())
            .load::<PayoutDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(PayoutDB::into_domain).collect()
    }

    fn exists_for_booking(&self, booking_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = payouts::table
            .filter(payouts::booking_id.eq(booking_id))
            .count()
            .get_result(&mut conn)
            .into_core()?;
        Ok(count > 0)
    }

    async fn mark_installment_paid(
        &self,
        payout_id: &str,
        kind: InstallmentKind,
    ) -> Result<Payout> {
        let payout_id = payout_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let payable = [
                    InstallmentStatus::Pending.as_str(),
                    InstallmentStatus::Failed.as_str(),
                ];
                // The status guard lives inside the UPDATE: of two racing
                // admins, exactly one matches the row.
                let affected = match kind {
                    InstallmentKind::First => diesel::update(
                        payouts::table
                            .filter(payouts::id.eq(&payout_id))
                            .filter(payouts::first_status.eq_any(payable)),
                    )
                    .set((
                        payouts::first_status.eq(InstallmentStatus::Paid.as_str()),
                        payouts::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .into_core()?,
                    InstallmentKind::Second => diesel::update(
                        payouts::table
                            .filter(payouts::id.eq(&payout_id))
                            .filter(payouts::second_status.eq_any(payable)),
                    )
                    .set((
                        payouts::second_status.eq(InstallmentStatus::Paid.as_str()),
                        payouts::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .into_core()?,
                };

                if affected == 0 {
                    let found: i64 = payouts::table
                        .filter(payouts::id.eq(&payout_id))
                        .count()
                        .get_result(conn)
                        .into_core()?;
                    return Err(if found == 0 {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Payout {payout_id} not found"
                        )))
                    } else {
                        Error::Precondition(format!(
                            "The {kind} installment of payout {payout_id} is not payable; refresh and retry"
                        ))
                    });
                }

                load_payout(conn, &payout_id)
            })
            .await
    }
}
