//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    NewUserRecord, StoreError, StoredCredentials, UserInsertError, UserRepository,
};
use crate::domain::{Email, User, UserId, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation_constraint};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(error: diesel::result::Error) -> UserInsertError {
    match unique_violation_constraint(&error) {
        Some("users_username_key") => UserInsertError::DuplicateUsername,
        Some("users_email_key") => UserInsertError::DuplicateEmail,
        _ => UserInsertError::Store(map_diesel_error(error)),
    }
}

/// Convert a database row to a domain user.
///
/// Stored values already passed validation on the way in; a row that no
/// longer validates indicates schema drift and surfaces as a query error.
fn row_to_user(row: UserRow) -> Result<User, StoreError> {
    Ok(User {
        id: UserId::from_uuid(row.id),
        username: Username::new(row.username)
            .map_err(|err| StoreError::query(format!("stored username invalid: {err}")))?,
        email: Email::new(row.email)
            .map_err(|err| StoreError::query(format!("stored email invalid: {err}")))?,
        age: row.age,
        country: row.country,
        residence: row.residence,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: NewUserRecord) -> Result<UserId, UserInsertError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserInsertError::Store(map_pool_error(err)))?;

        let id = Uuid::new_v4();
        let row = NewUserRow {
            id,
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            password_hash: &user.password_hash,
            age: user.age,
            country: user.country.as_deref(),
            residence: user.residence.as_deref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_insert_error)?;
        Ok(UserId::from_uuid(id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(Uuid, String)> = users::table
            .filter(users::username.eq(username))
            .select((users::id, users::password_hash))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|(id, password_hash)| StoredCredentials {
            user_id: UserId::from_uuid(id),
            password_hash,
        }))
    }

    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(users::table.find(user_id.as_uuid()))
            .set(users::password_hash.eq(password_hash))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
