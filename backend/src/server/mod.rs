//! Server construction: wiring adapters into services and services into the
//! HTTP state.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{
    AccountsService, AnalyticsService, InterestsService, ProjectsService, SkillsService,
};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::configure_api;
use backend::outbound::auth::Sha256PasswordHasher;
use backend::outbound::persistence::{
    DbPool, DieselInterestRepository, DieselProjectRepository, DieselSkillRepository,
    DieselTokenRepository, DieselUserRepository,
};

/// Wire Diesel repositories into domain services behind the HTTP state.
fn build_http_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let skills = Arc::new(DieselSkillRepository::new(pool.clone()));
    let projects = Arc::new(DieselProjectRepository::new(pool.clone()));
    let interests = Arc::new(DieselInterestRepository::new(pool.clone()));
    let tokens = Arc::new(DieselTokenRepository::new(pool.clone()));

    let accounts = Arc::new(AccountsService::new(
        users,
        tokens,
        Arc::new(Sha256PasswordHasher::new()),
    ));
    HttpState {
        accounts: accounts.clone(),
        token_auth: accounts,
        skills: Arc::new(SkillsService::new(skills.clone())),
        projects: Arc::new(ProjectsService::new(projects.clone())),
        projects_query: Arc::new(ProjectsService::new(projects.clone())),
        interests: Arc::new(InterestsService::new(interests.clone(), projects.clone())),
        interests_query: Arc::new(InterestsService::new(interests.clone(), projects.clone())),
        analytics: Arc::new(AnalyticsService::new(projects, interests, skills)),
    }
}

/// Build and start the HTTP server.
///
/// # Errors
///
/// Returns the bind error when the address is unavailable.
pub fn run(config: ServerConfig, health_state: web::Data<HealthState>) -> std::io::Result<Server> {
    let state = web::Data::new(build_http_state(&config.db_pool));

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(health_state.clone())
            .configure(configure_api)
            .service(live)
            .service(ready);
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .bind(config.bind_addr)?;

    Ok(server.run())
}
