//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    AvailableProject, NewProjectRecord, ProjectInsertError, ProjectRepository, StoreError,
};
use crate::domain::{Capacity, Project, ProjectId, ProjectName, ProjectStatus, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation_constraint};
use super::models::{NewProjectRow, ProjectRow};
use super::pool::DbPool;
use super::schema::{project_collaborators, projects, users};

/// Diesel-backed implementation of the `ProjectRepository` port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Parse the stored status, defaulting noisily on drift.
pub(crate) fn parse_status(value: &str, id: Uuid) -> ProjectStatus {
    ProjectStatus::parse(value).unwrap_or_else(|| {
        warn!(value, project = %id, "unrecognised project status, defaulting to draft");
        ProjectStatus::Draft
    })
}

/// Convert a database row to a domain project.
pub(crate) fn row_to_project(row: ProjectRow) -> Result<Project, StoreError> {
    let status = parse_status(&row.status, row.id);
    Ok(Project {
        id: ProjectId::from_uuid(row.id),
        name: ProjectName::new(row.project_name)
            .map_err(|err| StoreError::query(format!("stored project name invalid: {err}")))?,
        description: row.description,
        maximum_collaborators: Capacity::new(row.maximum_collaborators)
            .map_err(|err| StoreError::query(format!("stored capacity invalid: {err}")))?,
        current_collaborators: row.current_collaborators,
        creator_id: UserId::from_uuid(row.creator_id),
        status,
    })
}

fn map_insert_error(error: diesel::result::Error) -> ProjectInsertError {
    match unique_violation_constraint(&error) {
        Some("projects_project_name_key") => ProjectInsertError::DuplicateName,
        _ => ProjectInsertError::Store(map_diesel_error(error)),
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: NewProjectRecord) -> Result<Project, ProjectInsertError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ProjectInsertError::Store(map_pool_error(err)))?;

        let row = NewProjectRow {
            id: Uuid::new_v4(),
            project_name: project.name.as_ref(),
            description: &project.description,
            maximum_collaborators: project.maximum_collaborators.get(),
            current_collaborators: 0,
            creator_id: *project.creator_id.as_uuid(),
            status: ProjectStatus::Draft.as_str(),
        };

        let inserted: ProjectRow = diesel::insert_into(projects::table)
            .values(&row)
            .returning(ProjectRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error)?;
        row_to_project(inserted).map_err(ProjectInsertError::Store)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProjectRow> = projects::table
            .find(id.as_uuid())
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_project).transpose()
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Interests and collaborator rows go with the project via the
        // ON DELETE CASCADE foreign keys.
        diesel::delete(projects::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn close(&self, id: &ProjectId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(projects::table.find(id.as_uuid()))
            .set(projects::status.eq(ProjectStatus::Closed.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_available(&self) -> Result<Vec<AvailableProject>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(ProjectRow, String)> = projects::table
            .inner_join(users::table)
            .order(projects::created_at.asc())
            .select((ProjectRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        // Live counts from the association table, not the denormalized
        // counter, so the listing cannot drift.
        let counts: Vec<(Uuid, i64)> = project_collaborators::table
            .group_by(project_collaborators::project_id)
            .select((project_collaborators::project_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let counts: HashMap<Uuid, i64> = counts.into_iter().collect();

        Ok(rows
            .into_iter()
            .filter_map(|(row, creator)| {
                let live = counts.get(&row.id).copied().unwrap_or(0);
                if live >= i64::from(row.maximum_collaborators) {
                    return None;
                }
                Some(AvailableProject {
                    id: ProjectId::from_uuid(row.id),
                    status: parse_status(&row.status, row.id),
                    project_name: row.project_name,
                    description: row.description,
                    maximum_collaborators: row.maximum_collaborators,
                    current_collaborators: live,
                    creator,
                })
            })
            .collect())
    }

    async fn created_project_names(&self, user_id: &UserId) -> Result<Vec<String>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        projects::table
            .filter(projects::creator_id.eq(user_id.as_uuid()))
            .order(projects::created_at.asc())
            .select(projects::project_name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn collaboration_names(&self, user_id: &UserId) -> Result<Vec<String>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        project_collaborators::table
            .inner_join(projects::table)
            .filter(project_collaborators::user_id.eq(user_id.as_uuid()))
            .order(project_collaborators::added_at.asc())
            .select(projects::project_name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
