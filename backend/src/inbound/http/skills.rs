//! Skill API handlers.
//!
//! ```text
//! POST /api/add_skill/    {"skill_name":"Python"}
//! POST /api/remove_skill/ {"skill_name":"Python"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, SkillName, SkillValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthedUser;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Request body shared by skill mutations.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SkillRequest {
    /// Name of the skill to add or remove.
    pub skill_name: Option<String>,
}

fn parse_skill_name(request: SkillRequest) -> Result<SkillName, Error> {
    let Some(name) = request.skill_name else {
        return Err(Error::invalid_request("Skill name is required"));
    };
    SkillName::new(name).map_err(|err| match err {
        SkillValidationError::EmptyName => Error::invalid_request("Skill name is required"),
        other => Error::invalid_request(other.to_string()),
    })
}

/// Attach a skill to the authenticated user, creating the skill lazily.
#[utoipa::path(
    post,
    path = "/api/add_skill/",
    request_body = SkillRequest,
    responses(
        (status = 201, description = "Skill attached", body = MessageResponse),
        (status = 400, description = "Missing name, limit reached, or duplicate", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["skills"],
    operation_id = "addSkill"
)]
#[post("/add_skill/")]
pub async fn add_skill(
    state: web::Data<HttpState>,
    user: AuthedUser,
    payload: web::Json<SkillRequest>,
) -> ApiResult<HttpResponse> {
    let name = parse_skill_name(payload.into_inner())?;
    state.skills.add_skill(&user.user_id, &name).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Skill added successfully")))
}

/// Detach a skill from the authenticated user; the skill row survives for
/// other holders.
#[utoipa::path(
    post,
    path = "/api/remove_skill/",
    request_body = SkillRequest,
    responses(
        (status = 200, description = "Skill detached", body = MessageResponse),
        (status = 400, description = "Missing name or skill not held", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No such skill", body = Error)
    ),
    tags = ["skills"],
    operation_id = "removeSkill"
)]
#[post("/remove_skill/")]
pub async fn remove_skill(
    state: web::Data<HttpState>,
    user: AuthedUser,
    payload: web::Json<SkillRequest>,
) -> ApiResult<HttpResponse> {
    let name = parse_skill_name(payload.into_inner())?;
    state.skills.remove_skill(&user.user_id, &name).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Skill removed successfully")))
}
