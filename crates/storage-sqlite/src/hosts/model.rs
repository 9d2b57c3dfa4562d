//! Database models for users and host applications.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use wayfare_core::errors::{DatabaseError, Error, Result};
use wayfare_core::hosts::{ApplicationStatus, HostApplication, User};
use wayfare_core::statuses::UserRole;

/// Database model for users.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl UserDB {
    pub fn into_domain(self) -> Result<User> {
        let role = UserRole::parse(&self.role).ok_or_else(|| {
            Error::Database(DatabaseError::Internal(format!(
                "Unknown role '{}' on user {}",
                self.role, self.id
            )))
        })?;
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database model for host applications.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::host_applications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HostApplicationDB {
    pub id: String,
    pub user_id: String,
    pub motivation: Option<String>,
    pub status: String,
    pub applied_at: NaiveDateTime,
    pub decided_at: Option<NaiveDateTime>,
}

impl HostApplicationDB {
    pub fn into_domain(self) -> Result<HostApplication> {
        let status = ApplicationStatus::parse(&self.status).ok_or_else(|| {
            Error::Database(DatabaseError::Internal(format!(
                "Unknown application status '{}' on application {}",
                self.status, self.id
            )))
        })?;
        Ok(HostApplication {
            id: self.id,
            user_id: self.user_id,
            motivation: self.motivation,
            status,
            applied_at: self.applied_at,
            decided_at: self.decided_at,
        })
    }
}
