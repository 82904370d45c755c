//! Project lifecycle domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AvailableProject, NewProjectRecord, ProjectInsertError, ProjectRepository, ProjectsCommand,
    ProjectsQuery, map_store_error,
};
use crate::domain::{Error, Project, ProjectId, UserId};

/// Project lifecycle service implementing the [`ProjectsCommand`] and
/// [`ProjectsQuery`] ports.
#[derive(Clone)]
pub struct ProjectsService<P> {
    projects: Arc<P>,
}

impl<P> ProjectsService<P> {
    /// Create a new service backed by the given repository.
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }
}

impl<P> ProjectsService<P>
where
    P: ProjectRepository,
{
    /// Fetch a project and verify the requester created it.
    ///
    /// `forbidden_message` keeps the per-operation wording of the public
    /// contract.
    async fn find_owned(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
        forbidden_message: &str,
    ) -> Result<Project, Error> {
        let Some(project) = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(map_store_error)?
        else {
            return Err(Error::not_found("Project not found"));
        };
        if project.creator_id != *requester {
            return Err(Error::forbidden(forbidden_message));
        }
        Ok(project)
    }
}

#[async_trait]
impl<P> ProjectsCommand for ProjectsService<P>
where
    P: ProjectRepository,
{
    async fn create(&self, project: NewProjectRecord) -> Result<Project, Error> {
        self.projects
            .insert(project)
            .await
            .map_err(|err| match err {
                ProjectInsertError::DuplicateName => {
                    Error::conflict("A project with the same name already exists")
                }
                ProjectInsertError::Store(store) => map_store_error(store),
            })
    }

    async fn delete(&self, requester: &UserId, project_id: &ProjectId) -> Result<(), Error> {
        let project = self
            .find_owned(
                requester,
                project_id,
                "You are not authorized to delete this project",
            )
            .await?;
        self.projects
            .delete(&project.id)
            .await
            .map_err(map_store_error)
    }

    async fn close(&self, requester: &UserId, project_id: &ProjectId) -> Result<(), Error> {
        let project = self
            .find_owned(
                requester,
                project_id,
                "You are not authorized to close this project",
            )
            .await?;
        self.projects
            .close(&project.id)
            .await
            .map_err(map_store_error)
    }
}

#[async_trait]
impl<P> ProjectsQuery for ProjectsService<P>
where
    P: ProjectRepository,
{
    async fn available(&self) -> Result<Vec<AvailableProject>, Error> {
        self.projects.list_available().await.map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "projects_service_tests.rs"]
mod tests;
