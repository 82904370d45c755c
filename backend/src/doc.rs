//! OpenAPI surface used by Swagger UI and tooling.

use utoipa::OpenApi;

/// Aggregated OpenAPI document for the REST surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::reset_password,
        crate::inbound::http::users::obtain_token,
        crate::inbound::http::skills::add_skill,
        crate::inbound::http::skills::remove_skill,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::available_projects,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::projects::close_project,
        crate::inbound::http::interests::express_interest,
        crate::inbound::http::interests::project_interests,
        crate::inbound::http::interests::accept_or_reject_interest,
        crate::inbound::http::analytics::get_user_analytics,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::ProjectStatus,
        crate::domain::InterestStatus,
        crate::domain::ports::AvailableProject,
        crate::domain::ports::InterestDetails,
        crate::domain::ports::InterestedUser,
        crate::domain::ports::UserAnalytics,
        crate::inbound::http::schemas::MessageResponse,
        crate::inbound::http::users::CreateUserRequest,
        crate::inbound::http::users::ResetPasswordRequest,
        crate::inbound::http::users::TokenRequest,
        crate::inbound::http::users::TokenResponse,
        crate::inbound::http::skills::SkillRequest,
        crate::inbound::http::projects::CreateProjectRequest,
        crate::inbound::http::projects::ProjectResponse,
        crate::inbound::http::interests::DecisionRequest,
    )),
    tags(
        (name = "accounts", description = "Registration, password reset, and token issuance"),
        (name = "skills", description = "Per-user programming skill assignment"),
        (name = "projects", description = "Project lifecycle and availability"),
        (name = "interests", description = "Expression-of-interest lifecycle"),
        (name = "analytics", description = "Per-user aggregation"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi as _;

    #[test]
    fn document_contains_every_api_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/create_user/",
            "/api/reset_password/",
            "/api/token/",
            "/api/add_skill/",
            "/api/remove_skill/",
            "/api/create_project/",
            "/api/available_projects/",
            "/api/projects/{project_id}/delete/",
            "/api/projects/{project_id}/close/",
            "/api/projects/{project_id}/express_interest/",
            "/api/projects/{project_id}/interests/",
            "/api/projects/{project_id}/accept_or_reject_interest/{eoi_id}/",
            "/api/get_user_analytics/{user_id}/",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
