use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{host_applications, users};

use super::model::{HostApplicationDB, UserDB};
use wayfare_core::errors::{DatabaseError, Error, Result};
use wayfare_core::hosts::{
    ApplicationStatus, HostApplication, HostApplicationRepositoryTrait, NewHostApplication, User,
    UserRepositoryTrait,
};
use wayfare_core::statuses::UserRole;

/// Repository for managing user data in the database.
pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .into_core()?
            .into_domain()
    }

    fn list_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users::table
            .filter(users::role.eq(role.as_str()))
            .select(UserDB::as_select())
            .order(users::name.asc())
            .load::<UserDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(UserDB::into_domain).collect()
    }

    async fn set_role(&self, user_id: &str, role: UserRole) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::update(users::table.filter(users::id.eq(&user_id)))
                    .set((
                        users::role.eq(role.as_str()),
                        users::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                users::table
                    .find(&user_id)
                    .select(UserDB::as_select())
                    .first::<UserDB>(conn)
                    .into_core()?
                    .into_domain()
            })
            .await
    }
}

/// Repository for managing host application data in the database.
pub struct HostApplicationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HostApplicationRepository {
    /// Creates a new HostApplicationRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_application(
    conn: &mut SqliteConnection,
    application_id: &str,
) -> Result<HostApplication> {
    host_applications::table
        .find(application_id)
        .select(HostApplicationDB::as_select())
        .first::<HostApplicationDB>(conn)
        .into_core()?
        .into_domain()
}

#[async_trait]
impl HostApplicationRepositoryTrait for HostApplicationRepository {
    async fn create(&self, new_application: NewHostApplication) -> Result<HostApplication> {
        let row = HostApplicationDB {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: new_application.user_id,
            motivation: new_application.motivation,
            status: ApplicationStatus::Pending.as_str().to_string(),
            applied_at: Utc::now().naive_utc(),
            decided_at: None,
        };
        self.writer
            .exec(move |conn| {
                diesel::insert_into(host_applications::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                load_application(conn, &row.id)
            })
            .await
    }

    fn get_by_id(&self, application_id: &str) -> Result<HostApplication> {
        let mut conn = get_connection(&self.pool)?;
        load_application(&mut conn, application_id)
    }

    fn list_pending(&self) -> Result<Vec<HostApplication>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = host_applications::table
            .filter(host_applications::status.eq(ApplicationStatus::Pending.as_str()))
            .select(HostApplicationDB::as_select())
            .order(host_applications::applied_at.asc())
            .load::<HostApplicationDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(HostApplicationDB::into_domain).collect()
    }

    async fn decide(
        &self,
        application_id: &str,
        status: ApplicationStatus,
        decided_at: NaiveDateTime,
    ) -> Result<HostApplication> {
        let application_id = application_id.to_string();
        self.writer
            .exec(move |conn| {
                // Guarded on PENDING: deciding twice loses the race cleanly.
                let affected = diesel::update(
                    host_applications::table
                        .filter(host_applications::id.eq(&application_id))
                        .filter(
                            host_applications::status.eq(ApplicationStatus::Pending.as_str()),
                        ),
                )
                .set((
                    host_applications::status.eq(status.as_str()),
                    host_applications::decided_at.eq(Some(decided_at)),
                ))
                .execute(conn)
                .into_core()?;

                if affected == 0 {
                    let found: i64 = host_applications::table
                        .filter(host_applications::id.eq(&application_id))
                        .count()
                        .get_result(conn)
                        .into_core()?;
                    return Err(if found == 0 {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Application {application_id} not found"
                        )))
                    } else {
                        Error::Precondition(format!(
                            "Application {application_id} was already decided"
                        ))
                    });
                }

                load_application(conn, &application_id)
            })
            .await
    }
}
