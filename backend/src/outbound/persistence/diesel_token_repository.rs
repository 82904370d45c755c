//! PostgreSQL-backed `TokenRepository` implementation using Diesel ORM.
//!
//! One token per user, issued lazily. Keys are 40 hex characters drawn from
//! the OS RNG, matching the issued-token format of the original auth layer.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use rand::RngCore;
use uuid::Uuid;

use crate::domain::ports::{StoreError, TokenKey, TokenRepository};
use crate::domain::UserId;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewTokenRow;
use super::pool::DbPool;
use super::schema::auth_tokens;

/// Diesel-backed implementation of the `TokenRepository` port.
#[derive(Clone)]
pub struct DieselTokenRepository {
    pool: DbPool,
}

impl DieselTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Generate a fresh 40-character hex key.
fn generate_key() -> String {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[async_trait]
impl TokenRepository for DieselTokenRepository {
    async fn get_or_create(&self, user_id: &UserId) -> Result<TokenKey, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_id = *user_id.as_uuid();

        let existing: Option<String> = auth_tokens::table
            .filter(auth_tokens::user_id.eq(user_id))
            .select(auth_tokens::key)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        if let Some(key) = existing {
            return Ok(TokenKey::new(key));
        }

        // Losing the insert race to a concurrent issuance is fine; the
        // re-select below returns whichever key won.
        let key = generate_key();
        diesel::insert_into(auth_tokens::table)
            .values(&NewTokenRow {
                key: &key,
                user_id,
            })
            .on_conflict(auth_tokens::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let key: String = auth_tokens::table
            .filter(auth_tokens::user_id.eq(user_id))
            .select(auth_tokens::key)
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(TokenKey::new(key))
    }

    async fn find_user(&self, key: &str) -> Result<Option<UserId>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_id: Option<Uuid> = auth_tokens::table
            .find(key)
            .select(auth_tokens::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(user_id.map(UserId::from_uuid))
    }
}
