//! Shared helpers for handler tests.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use crate::domain::{
    AccountsService, AnalyticsService, InterestsService, ProjectsService, SkillsService,
};
use crate::inbound::http::state::HttpState;
use crate::test_support::{InMemoryStore, PlainTextHasher};

/// Build handler state over a shared in-memory store and return both.
pub fn test_state() -> (web::Data<HttpState>, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let accounts = Arc::new(AccountsService::new(
        store.clone(),
        store.clone(),
        Arc::new(PlainTextHasher),
    ));
    let state = HttpState {
        accounts: accounts.clone(),
        token_auth: accounts,
        skills: Arc::new(SkillsService::new(store.clone())),
        projects: Arc::new(ProjectsService::new(store.clone())),
        projects_query: Arc::new(ProjectsService::new(store.clone())),
        interests: Arc::new(InterestsService::new(store.clone(), store.clone())),
        interests_query: Arc::new(InterestsService::new(store.clone(), store.clone())),
        analytics: Arc::new(AnalyticsService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
    };
    (web::Data::new(state), store)
}

/// Application with every `/api` endpoint registered.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(crate::inbound::http::configure_api)
}

/// Dispatch a request and return the status plus the JSON body.
pub async fn call_json<S, B>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, body)
}
