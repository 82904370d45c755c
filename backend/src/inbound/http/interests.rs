//! Expression-of-interest API handlers.
//!
//! ```text
//! POST /api/projects/{id}/express_interest/
//! GET  /api/projects/{id}/interests/
//! POST /api/projects/{id}/accept_or_reject_interest/{eoi_id}/ {"action":"accept"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::InterestDetails;
use crate::domain::{DecisionAction, Error, InterestId, ProjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthedUser;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Request body for the accept/reject decision.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DecisionRequest {
    /// Either `accept` or `reject`; anything else is an invalid action.
    pub action: Option<String>,
}

/// Express interest in joining a project.
#[utoipa::path(
    post,
    path = "/api/projects/{project_id}/express_interest/",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 201, description = "Interest recorded as pending", body = MessageResponse),
        (status = 400, description = "Active interest already exists", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No such project", body = Error)
    ),
    tags = ["interests"],
    operation_id = "expressInterest"
)]
#[post("/projects/{project_id}/express_interest/")]
pub async fn express_interest(
    state: web::Data<HttpState>,
    user: AuthedUser,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let project_id = ProjectId::from_uuid(path.into_inner());
    state.interests.express(&user.user_id, &project_id).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new(
        "User expressed interest in the project successfully",
    )))
}

/// List a project's expressions of interest; creator only.
///
/// Answers 404 for foreign projects as well as absent ones, so callers
/// cannot probe for project existence.
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/interests/",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Interests with user details", body = [InterestDetails]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No such project for this caller", body = Error)
    ),
    tags = ["interests"],
    operation_id = "projectInterests"
)]
#[get("/projects/{project_id}/interests/")]
pub async fn project_interests(
    state: web::Data<HttpState>,
    user: AuthedUser,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<InterestDetails>>> {
    let project_id = ProjectId::from_uuid(path.into_inner());
    let interests = state
        .interests_query
        .list_for_project(&user.user_id, &project_id)
        .await?;
    Ok(web::Json(interests))
}

/// Accept or reject a pending expression of interest; creator only.
#[utoipa::path(
    post,
    path = "/api/projects/{project_id}/accept_or_reject_interest/{eoi_id}/",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("eoi_id" = String, Path, description = "Expression-of-interest identifier")
    ),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Decision applied", body = MessageResponse),
        (status = 400, description = "Invalid action, already decided, or full", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not the creator", body = Error),
        (status = 404, description = "No such interest under this project", body = Error)
    ),
    tags = ["interests"],
    operation_id = "acceptOrRejectInterest"
)]
#[post("/projects/{project_id}/accept_or_reject_interest/{eoi_id}/")]
pub async fn accept_or_reject_interest(
    state: web::Data<HttpState>,
    user: AuthedUser,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<DecisionRequest>,
) -> ApiResult<HttpResponse> {
    let (project_id, eoi_id) = path.into_inner();
    let project_id = ProjectId::from_uuid(project_id);
    let eoi_id = InterestId::from_uuid(eoi_id);
    let action = payload.into_inner().action;

    let applied = state
        .interests
        .decide(&user.user_id, &project_id, &eoi_id, action.as_deref())
        .await?;
    let message = match applied {
        DecisionAction::Accept => "Interest accepted successfully",
        DecisionAction::Reject => "Interest rejected successfully",
    };
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{call_json, test_app, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    async fn create_project<S, B>(app: &S, token: &str, name: &str, capacity: i32) -> String
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
    {
        let (status, body) = call_json(
            app,
            actix_test::TestRequest::post()
                .uri("/api/create_project/")
                .insert_header(("Authorization", format!("Token {token}")))
                .set_json(json!({
                    "project_name": name,
                    "description": format!("Description for {name}"),
                    "maximum_collaborators": capacity
                })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body.get("id")
            .and_then(Value::as_str)
            .expect("project id")
            .to_owned()
    }

    fn express_request(token: &str, project_id: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri(&format!("/api/projects/{project_id}/express_interest/"))
            .insert_header(("Authorization", format!("Token {token}")))
    }

    fn decide_request(
        token: &str,
        project_id: &str,
        eoi_id: &str,
        action: Value,
    ) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri(&format!(
                "/api/projects/{project_id}/accept_or_reject_interest/{eoi_id}/"
            ))
            .insert_header(("Authorization", format!("Token {token}")))
            .set_json(json!({ "action": action }))
    }

    fn interests_request(token: &str, project_id: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::get()
            .uri(&format!("/api/projects/{project_id}/interests/"))
            .insert_header(("Authorization", format!("Token {token}")))
    }

    #[actix_web::test]
    async fn express_interest_records_pending_interest() {
        let (state, store) = test_state();
        let (_, creator_token) = store.seed_user("creator");
        let (_, user_token) = store.seed_user("user1");
        let app = actix_test::init_service(test_app(state)).await;
        let project_id = create_project(&app, creator_token.as_str(), "Project 1", 3).await;

        let (status, body) =
            call_json(&app, express_request(user_token.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("User expressed interest in the project successfully")
        );

        let (status, body) = call_json(&app, express_request(user_token.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("User has already expressed interest in this project")
        );
    }

    #[actix_web::test]
    async fn express_interest_rejects_unknown_project() {
        let (state, store) = test_state();
        let (_, token) = store.seed_user("user1");
        let app = actix_test::init_service(test_app(state)).await;

        let (status, body) = call_json(
            &app,
            express_request(token.as_str(), &Uuid::new_v4().to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Project does not exist")
        );
    }

    #[actix_web::test]
    async fn interests_listing_is_creator_scoped_and_carries_user_details() {
        let (state, store) = test_state();
        let (_, creator_token) = store.seed_user("creator");
        let (_, user_token) = store.seed_user("user1");
        let app = actix_test::init_service(test_app(state)).await;
        let project_id = create_project(&app, creator_token.as_str(), "Test Project", 3).await;

        // The interested user holds a skill that must surface in the listing.
        let (status, _) = call_json(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/add_skill/")
                .insert_header(("Authorization", format!("Token {user_token}")))
                .set_json(json!({"skill_name": "Python"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = call_json(&app, express_request(user_token.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) =
            call_json(&app, interests_request(creator_token.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::OK);
        let listing = body.as_array().expect("array body");
        assert_eq!(listing.len(), 1);
        let entry = &listing[0];
        assert_eq!(entry.get("status").and_then(Value::as_str), Some("pending"));
        let details = entry.get("user_details").expect("user details");
        assert_eq!(
            details.get("username").and_then(Value::as_str),
            Some("user1")
        );
        assert_eq!(
            details.get("programming_skills"),
            Some(&json!(["Python"]))
        );

        // A non-creator gets the same answer as for an absent project.
        let (status, _) = call_json(&app, interests_request(user_token.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn capacity_one_lifecycle_accepts_first_and_rejects_second() {
        let (state, store) = test_state();
        let (_, creator_token) = store.seed_user("creator");
        let (user_a, token_a) = store.seed_user("user_a");
        let (_, token_b) = store.seed_user("user_b");
        let app = actix_test::init_service(test_app(state)).await;
        let project_id = create_project(&app, creator_token.as_str(), "Project", 1).await;

        let (status, _) = call_json(&app, express_request(token_a.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = call_json(&app, express_request(token_b.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) =
            call_json(&app, interests_request(creator_token.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::OK);
        let listing = body.as_array().expect("array body");
        let eoi_a = listing[0].get("id").and_then(Value::as_str).expect("id").to_owned();
        let eoi_b = listing[1].get("id").and_then(Value::as_str).expect("id").to_owned();

        let (status, body) = call_json(
            &app,
            decide_request(creator_token.as_str(), &project_id, &eoi_a, json!("accept")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Interest accepted successfully")
        );

        let project = store
            .project(&ProjectId::from_uuid(
                project_id.parse().expect("valid uuid"),
            ))
            .expect("project exists");
        assert_eq!(project.current_collaborators, 1);
        assert_eq!(project.status.as_str(), "active");
        assert!(store.is_collaborator(&project.id, &user_a));

        // Accepting B on the now-full project is a conflict.
        let (status, body) = call_json(
            &app,
            decide_request(creator_token.as_str(), &project_id, &eoi_b, json!("accept")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Project is already full")
        );

        // And the full project left the availability listing.
        let (status, body) = call_json(
            &app,
            actix_test::TestRequest::get().uri("/api/available_projects/"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn double_accept_is_a_conflict() {
        let (state, store) = test_state();
        let (_, creator_token) = store.seed_user("creator");
        let (_, user_token) = store.seed_user("user");
        let app = actix_test::init_service(test_app(state)).await;
        let project_id = create_project(&app, creator_token.as_str(), "Project", 2).await;

        let (status, _) = call_json(&app, express_request(user_token.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, body) = call_json(&app, interests_request(creator_token.as_str(), &project_id)).await;
        let eoi = body.as_array().expect("array")[0]
            .get("id")
            .and_then(Value::as_str)
            .expect("id")
            .to_owned();

        let (status, _) = call_json(
            &app,
            decide_request(creator_token.as_str(), &project_id, &eoi, json!("accept")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call_json(
            &app,
            decide_request(creator_token.as_str(), &project_id, &eoi, json!("accept")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("User is already accepted for this project")
        );
    }

    #[actix_web::test]
    async fn decision_is_creator_only_and_validates_action() {
        let (state, store) = test_state();
        let (_, creator_token) = store.seed_user("creator");
        let (_, user_token) = store.seed_user("user");
        let app = actix_test::init_service(test_app(state)).await;
        let project_id = create_project(&app, creator_token.as_str(), "Project", 2).await;

        let (status, _) = call_json(&app, express_request(user_token.as_str(), &project_id)).await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, body) = call_json(&app, interests_request(creator_token.as_str(), &project_id)).await;
        let eoi = body.as_array().expect("array")[0]
            .get("id")
            .and_then(Value::as_str)
            .expect("id")
            .to_owned();

        let (status, body) = call_json(
            &app,
            decide_request(user_token.as_str(), &project_id, &eoi, json!("accept")),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Only the creator of the project can accept or reject interests")
        );

        let (status, body) = call_json(
            &app,
            decide_request(creator_token.as_str(), &project_id, &eoi, json!("approve")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Invalid action")
        );

        let (status, _) = call_json(
            &app,
            decide_request(
                creator_token.as_str(),
                &project_id,
                &Uuid::new_v4().to_string(),
                json!("accept"),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
