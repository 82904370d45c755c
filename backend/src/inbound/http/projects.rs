//! Project API handlers.
//!
//! ```text
//! POST   /api/create_project/       {"project_name":"X","description":"...","maximum_collaborators":5}
//! GET    /api/available_projects/
//! DELETE /api/projects/{id}/delete/
//! POST   /api/projects/{id}/close/
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{AvailableProject, NewProjectRecord};
use crate::domain::{
    Capacity, Error, Project, ProjectId, ProjectName, ProjectStatus, ProjectValidationError,
    UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthedUser;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/create_project/`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateProjectRequest {
    /// Unique project name.
    pub project_name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Collaborator ceiling; must be a positive integer.
    pub maximum_collaborators: Option<i32>,
}

/// Response body for a created project.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ProjectResponse {
    /// Stable identifier.
    #[schema(value_type = String)]
    pub id: ProjectId,
    /// Unique project name.
    pub project_name: String,
    /// Free-form description.
    pub description: String,
    /// Collaborator ceiling.
    pub maximum_collaborators: i32,
    /// Denormalized collaborator counter.
    pub current_collaborators: i32,
    /// Lifecycle status.
    pub status: ProjectStatus,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            project_name: project.name.into(),
            description: project.description,
            maximum_collaborators: project.maximum_collaborators.get(),
            current_collaborators: project.current_collaborators,
            status: project.status,
        }
    }
}

fn map_project_validation_error(err: ProjectValidationError) -> Error {
    match err {
        ProjectValidationError::EmptyName => Error::invalid_request("Project name is required"),
        ProjectValidationError::NonPositiveCapacity => {
            Error::invalid_request("maximum_collaborators must be a positive integer")
        }
        other => Error::invalid_request(other.to_string()),
    }
}

fn parse_create_project(
    request: CreateProjectRequest,
    creator_id: UserId,
) -> Result<NewProjectRecord, Error> {
    let CreateProjectRequest {
        project_name,
        description,
        maximum_collaborators,
    } = request;
    let Some(project_name) = project_name else {
        return Err(Error::invalid_request("Project name is required"));
    };
    let Some(description) = description else {
        return Err(Error::invalid_request("Description is required"));
    };
    let Some(maximum_collaborators) = maximum_collaborators else {
        return Err(Error::invalid_request(
            "maximum_collaborators must be a positive integer",
        ));
    };
    Ok(NewProjectRecord {
        name: ProjectName::new(project_name).map_err(map_project_validation_error)?,
        description,
        maximum_collaborators: Capacity::new(maximum_collaborators)
            .map_err(map_project_validation_error)?,
        creator_id,
    })
}

/// Create a project with the authenticated user as creator.
#[utoipa::path(
    post,
    path = "/api/create_project/",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created in draft status", body = ProjectResponse),
        (status = 400, description = "Invalid fields or duplicate name", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/create_project/")]
pub async fn create_project(
    state: web::Data<HttpState>,
    user: AuthedUser,
    payload: web::Json<CreateProjectRequest>,
) -> ApiResult<HttpResponse> {
    let record = parse_create_project(payload.into_inner(), user.user_id)?;
    let project = state.projects.create(record).await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(project)))
}

/// List projects with free collaborator seats, regardless of status.
///
/// The collaborator count is computed live from the association table so the
/// listing cannot drift from reality.
#[utoipa::path(
    get,
    path = "/api/available_projects/",
    responses(
        (status = 200, description = "Projects with free seats", body = [AvailableProject]),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["projects"],
    operation_id = "availableProjects",
    security([])
)]
#[get("/available_projects/")]
pub async fn available_projects(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AvailableProject>>> {
    let projects = state.projects_query.available().await?;
    Ok(web::Json(projects))
}

/// Delete a project; only its creator may do so.
#[utoipa::path(
    delete,
    path = "/api/projects/{project_id}/delete/",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not the creator", body = Error),
        (status = 404, description = "No such project", body = Error)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{project_id}/delete/")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    user: AuthedUser,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let project_id = ProjectId::from_uuid(path.into_inner());
    state.projects.delete(&user.user_id, &project_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Project deleted successfully")))
}

/// Close a project; only its creator may do so. Closing ignores remaining
/// capacity.
#[utoipa::path(
    post,
    path = "/api/projects/{project_id}/close/",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project closed", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not the creator", body = Error),
        (status = 404, description = "No such project", body = Error)
    ),
    tags = ["projects"],
    operation_id = "closeProject"
)]
#[post("/projects/{project_id}/close/")]
pub async fn close_project(
    state: web::Data<HttpState>,
    user: AuthedUser,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let project_id = ProjectId::from_uuid(path.into_inner());
    state.projects.close(&user.user_id, &project_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Project closed successfully")))
}
