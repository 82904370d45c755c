//! PostgreSQL-backed `SkillRepository` implementation using Diesel ORM.
//!
//! The attach path runs as one transaction with the user row locked, so the
//! count-check-attach sequence cannot interleave with a concurrent attach
//! for the same user. Skill rows are created with an upsert against the
//! unique name constraint and are never deleted.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{SkillAttachError, SkillRepository, StoreError};
use crate::domain::{SKILL_LIMIT, SkillId, SkillName, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSkillRow, NewUserSkillRow};
use super::pool::DbPool;
use super::schema::{programming_skills, user_skills, users};

/// Diesel-backed implementation of the `SkillRepository` port.
#[derive(Clone)]
pub struct DieselSkillRepository {
    pool: DbPool,
}

impl DieselSkillRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Transaction-internal error carrier; `From<diesel::result::Error>` lets
/// `?` propagate Diesel failures out of the closure.
enum AttachTxError {
    Limit,
    Held,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for AttachTxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_attach_error(error: AttachTxError) -> SkillAttachError {
    match error {
        AttachTxError::Limit => SkillAttachError::LimitExceeded,
        AttachTxError::Held => SkillAttachError::AlreadyHeld,
        AttachTxError::Diesel(err) => SkillAttachError::Store(map_diesel_error(err)),
    }
}

#[async_trait]
impl SkillRepository for DieselSkillRepository {
    async fn add_to_user(
        &self,
        user_id: &UserId,
        name: &SkillName,
    ) -> Result<(), SkillAttachError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| SkillAttachError::Store(map_pool_error(err)))?;
        let user_id = *user_id.as_uuid();
        let name = name.as_ref().to_owned();

        conn.transaction::<_, AttachTxError, _>(|conn| {
            async move {
                // Serialize concurrent attaches for the same user on the
                // user row.
                users::table
                    .find(user_id)
                    .select(users::id)
                    .for_update()
                    .first::<Uuid>(conn)
                    .await?;

                let held: i64 = user_skills::table
                    .filter(user_skills::user_id.eq(user_id))
                    .count()
                    .get_result(conn)
                    .await?;
                if held >= SKILL_LIMIT as i64 {
                    return Err(AttachTxError::Limit);
                }

                // Idempotent get-or-create against the unique name index.
                diesel::insert_into(programming_skills::table)
                    .values(&NewSkillRow {
                        id: Uuid::new_v4(),
                        name: &name,
                    })
                    .on_conflict(programming_skills::name)
                    .do_nothing()
                    .execute(conn)
                    .await?;
                let skill_id: Uuid = programming_skills::table
                    .filter(programming_skills::name.eq(&name))
                    .select(programming_skills::id)
                    .first(conn)
                    .await?;

                let already_held: i64 = user_skills::table
                    .filter(user_skills::user_id.eq(user_id))
                    .filter(user_skills::skill_id.eq(skill_id))
                    .count()
                    .get_result(conn)
                    .await?;
                if already_held > 0 {
                    return Err(AttachTxError::Held);
                }

                diesel::insert_into(user_skills::table)
                    .values(&NewUserSkillRow { user_id, skill_id })
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_attach_error)
    }

    async fn find_by_name(&self, name: &SkillName) -> Result<Option<SkillId>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: Option<Uuid> = programming_skills::table
            .filter(programming_skills::name.eq(name.as_ref()))
            .select(programming_skills::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(id.map(SkillId::from_uuid))
    }

    async fn remove_from_user(
        &self,
        user_id: &UserId,
        skill_id: &SkillId,
    ) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            user_skills::table
                .filter(user_skills::user_id.eq(user_id.as_uuid()))
                .filter(user_skills::skill_id.eq(skill_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn names_for_user(&self, user_id: &UserId) -> Result<Vec<String>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        user_skills::table
            .inner_join(programming_skills::table)
            .filter(user_skills::user_id.eq(user_id.as_uuid()))
            .order(user_skills::added_at.asc())
            .select(programming_skills::name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
