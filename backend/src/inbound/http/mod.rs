//! HTTP inbound adapter exposing the REST endpoints.

pub mod analytics;
pub mod auth;
pub mod error;
pub mod health;
pub mod interests;
pub mod projects;
pub mod schemas;
pub mod skills;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` endpoint on the given service config.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(users::create_user)
            .service(users::reset_password)
            .service(users::obtain_token)
            .service(skills::add_skill)
            .service(skills::remove_skill)
            .service(projects::create_project)
            .service(projects::available_projects)
            .service(projects::delete_project)
            .service(projects::close_project)
            .service(interests::express_interest)
            .service(interests::project_interests)
            .service(interests::accept_or_reject_interest)
            .service(analytics::get_user_analytics),
    );
}
