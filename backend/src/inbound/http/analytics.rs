//! Per-user analytics API handler.

use actix_web::{get, web};
use uuid::Uuid;

use crate::domain::ports::UserAnalytics;
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthedUser;
use crate::inbound::http::state::HttpState;

/// Aggregate a user's created projects, collaborations, interests, and
/// skills.
///
/// The aggregation is computed for the path user id; an unknown id yields
/// empty aggregates rather than an error.
#[utoipa::path(
    get,
    path = "/api/get_user_analytics/{user_id}/",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Aggregated analytics", body = UserAnalytics),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["analytics"],
    operation_id = "getUserAnalytics"
)]
#[get("/get_user_analytics/{user_id}/")]
pub async fn get_user_analytics(
    state: web::Data<HttpState>,
    _caller: AuthedUser,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<UserAnalytics>> {
    let user_id = UserId::from_uuid(path.into_inner());
    let analytics = state.analytics.for_user(&user_id).await?;
    Ok(web::Json(analytics))
}
