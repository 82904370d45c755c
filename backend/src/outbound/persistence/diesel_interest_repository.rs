//! PostgreSQL-backed `InterestRepository` implementation using Diesel ORM.
//!
//! The accept path is the capacity-critical transition: it locks the project
//! row with `FOR UPDATE`, re-checks the counter against the ceiling, and
//! applies all four mutations (interest status, collaborator row, counter,
//! project activation) in one transaction. Two concurrent accepts therefore
//! serialize on the project row and the second observes the first's counter.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    DecisionError, InterestDetails, InterestInsertError, InterestRepository, InterestedUser,
    StoreError,
};
use crate::domain::{
    ExpressionOfInterest, InterestId, InterestStatus, Project, ProjectId, ProjectStatus, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation_constraint};
use super::diesel_project_repository::row_to_project;
use super::models::{InterestRow, NewCollaboratorRow, NewInterestRow, ProjectRow};
use super::pool::DbPool;
use super::schema::{
    expressions_of_interest, programming_skills, project_collaborators, projects, user_skills,
    users,
};

/// Name of the partial unique index covering pending and accepted rows.
const ACTIVE_INTEREST_INDEX: &str = "expressions_of_interest_active_user_project_idx";

/// Diesel-backed implementation of the `InterestRepository` port.
#[derive(Clone)]
pub struct DieselInterestRepository {
    pool: DbPool,
}

impl DieselInterestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Parse the stored interest status, defaulting noisily on drift.
fn parse_interest_status(value: &str, id: Uuid) -> InterestStatus {
    InterestStatus::parse(value).unwrap_or_else(|| {
        warn!(value, interest = %id, "unrecognised interest status, defaulting to pending");
        InterestStatus::Pending
    })
}

/// Convert a database row to a domain expression of interest.
fn row_to_interest(row: InterestRow) -> ExpressionOfInterest {
    let status = parse_interest_status(&row.status, row.id);
    ExpressionOfInterest {
        id: InterestId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        project_id: ProjectId::from_uuid(row.project_id),
        status,
        created_at: row.created_at,
    }
}

fn map_insert_error(error: diesel::result::Error) -> InterestInsertError {
    match unique_violation_constraint(&error) {
        Some(ACTIVE_INTEREST_INDEX) => InterestInsertError::AlreadyExpressed,
        _ => InterestInsertError::Store(map_diesel_error(error)),
    }
}

/// Transaction-internal error carrier for the decision paths.
enum DecisionTxError {
    NotFound,
    NotPending,
    Full,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for DecisionTxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_decision_error(error: DecisionTxError) -> DecisionError {
    match error {
        DecisionTxError::NotFound => DecisionError::NotFound,
        DecisionTxError::NotPending => DecisionError::NotPending,
        DecisionTxError::Full => DecisionError::ProjectFull,
        DecisionTxError::Diesel(err) => DecisionError::Store(map_diesel_error(err)),
    }
}

/// Load the interest row under lock and insist it is still pending.
async fn lock_pending_interest(
    conn: &mut AsyncPgConnection,
    eoi_id: Uuid,
) -> Result<InterestRow, DecisionTxError> {
    let row: Option<InterestRow> = expressions_of_interest::table
        .find(eoi_id)
        .select(InterestRow::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()?;
    let row = row.ok_or(DecisionTxError::NotFound)?;
    if parse_interest_status(&row.status, row.id) != InterestStatus::Pending {
        return Err(DecisionTxError::NotPending);
    }
    Ok(row)
}

#[async_trait]
impl InterestRepository for DieselInterestRepository {
    async fn insert_pending(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<ExpressionOfInterest, InterestInsertError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| InterestInsertError::Store(map_pool_error(err)))?;

        let row = NewInterestRow {
            id: Uuid::new_v4(),
            user_id: *user_id.as_uuid(),
            project_id: *project_id.as_uuid(),
            status: InterestStatus::Pending.as_str(),
        };

        let inserted: InterestRow = diesel::insert_into(expressions_of_interest::table)
            .values(&row)
            .returning(InterestRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error)?;
        Ok(row_to_interest(inserted))
    }

    async fn find_with_project(
        &self,
        project_id: &ProjectId,
        eoi_id: &InterestId,
    ) -> Result<Option<(ExpressionOfInterest, Project)>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(InterestRow, ProjectRow)> = expressions_of_interest::table
            .inner_join(projects::table)
            .filter(expressions_of_interest::id.eq(eoi_id.as_uuid()))
            .filter(expressions_of_interest::project_id.eq(project_id.as_uuid()))
            .select((InterestRow::as_select(), ProjectRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(interest, project)| Ok((row_to_interest(interest), row_to_project(project)?)))
            .transpose()
    }

    async fn accept(&self, eoi_id: &InterestId) -> Result<(), DecisionError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| DecisionError::Store(map_pool_error(err)))?;
        let eoi_id = *eoi_id.as_uuid();

        conn.transaction::<_, DecisionTxError, _>(|conn| {
            async move {
                let interest = lock_pending_interest(conn, eoi_id).await?;

                // Capacity check under the project row lock; this is the
                // single place acceptance capacity is decided.
                let project: Option<ProjectRow> = projects::table
                    .find(interest.project_id)
                    .select(ProjectRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let project = project.ok_or(DecisionTxError::NotFound)?;
                if project.current_collaborators >= project.maximum_collaborators {
                    return Err(DecisionTxError::Full);
                }

                diesel::update(expressions_of_interest::table.find(eoi_id))
                    .set(expressions_of_interest::status.eq(InterestStatus::Accepted.as_str()))
                    .execute(conn)
                    .await?;

                diesel::insert_into(project_collaborators::table)
                    .values(&NewCollaboratorRow {
                        project_id: project.id,
                        user_id: interest.user_id,
                    })
                    .execute(conn)
                    .await?;

                let new_count = project.current_collaborators + 1;
                if new_count == 1 {
                    diesel::update(projects::table.find(project.id))
                        .set((
                            projects::current_collaborators.eq(new_count),
                            projects::status.eq(ProjectStatus::Active.as_str()),
                        ))
                        .execute(conn)
                        .await?;
                } else {
                    diesel::update(projects::table.find(project.id))
                        .set(projects::current_collaborators.eq(new_count))
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_decision_error)
    }

    async fn reject(&self, eoi_id: &InterestId) -> Result<(), DecisionError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| DecisionError::Store(map_pool_error(err)))?;
        let eoi_id = *eoi_id.as_uuid();

        conn.transaction::<_, DecisionTxError, _>(|conn| {
            async move {
                let interest = lock_pending_interest(conn, eoi_id).await?;

                diesel::update(expressions_of_interest::table.find(eoi_id))
                    .set(expressions_of_interest::status.eq(InterestStatus::Rejected.as_str()))
                    .execute(conn)
                    .await?;

                // A pending interest never joined the collaborator set, so
                // this delete is a no-op in practice; the counter only moves
                // when a row was actually removed.
                let removed = diesel::delete(
                    project_collaborators::table
                        .filter(project_collaborators::project_id.eq(interest.project_id))
                        .filter(project_collaborators::user_id.eq(interest.user_id)),
                )
                .execute(conn)
                .await?;
                if removed > 0 {
                    diesel::update(projects::table.find(interest.project_id))
                        .set(
                            projects::current_collaborators
                                .eq(projects::current_collaborators - 1),
                        )
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_decision_error)
    }

    async fn details_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<InterestDetails>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(InterestRow, (String, String))> = expressions_of_interest::table
            .inner_join(users::table)
            .filter(expressions_of_interest::project_id.eq(project_id.as_uuid()))
            .order(expressions_of_interest::created_at.asc())
            .select((
                InterestRow::as_select(),
                (users::username, users::email),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let user_ids: Vec<Uuid> = rows.iter().map(|(row, _)| row.user_id).collect();
        let skill_rows: Vec<(Uuid, String)> = user_skills::table
            .inner_join(programming_skills::table)
            .filter(user_skills::user_id.eq_any(&user_ids))
            .order(user_skills::added_at.asc())
            .select((user_skills::user_id, programming_skills::name))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let mut skills_by_user: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (user_id, name) in skill_rows {
            skills_by_user.entry(user_id).or_default().push(name);
        }

        Ok(rows
            .into_iter()
            .map(|(row, (username, email))| {
                let programming_skills = skills_by_user.remove(&row.user_id).unwrap_or_default();
                let interest = row_to_interest(row);
                InterestDetails {
                    id: interest.id,
                    user_details: InterestedUser {
                        username,
                        email,
                        programming_skills,
                    },
                    status: interest.status,
                    created_at: interest.created_at,
                }
            })
            .collect())
    }

    async fn interest_project_names(&self, user_id: &UserId) -> Result<Vec<String>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        expressions_of_interest::table
            .inner_join(projects::table)
            .filter(expressions_of_interest::user_id.eq(user_id.as_uuid()))
            .order(expressions_of_interest::created_at.asc())
            .select(projects::project_name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
