//! Account API handlers.
//!
//! ```text
//! POST /api/create_user/    {"username":"ada","password":"pw","email":"ada@example.com"}
//! POST /api/reset_password/ {"username":"ada","password":"new-pw"}
//! POST /api/token/          {"username":"ada","password":"pw"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{NewAccount, TokenKey};
use crate::domain::{AccountValidationError, Email, Error, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/create_user/`.
///
/// All three credentials are required; age, country, and residence are
/// optional profile fields.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    /// Unique login name.
    pub username: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
    /// Unique contact address.
    pub email: Option<String>,
    /// Optional age.
    pub age: Option<i32>,
    /// Optional country.
    pub country: Option<String>,
    /// Optional city of residence.
    pub residence: Option<String>,
}

/// Password reset request body for `POST /api/reset_password/`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ResetPasswordRequest {
    /// Login name of the account to reset.
    pub username: Option<String>,
    /// Replacement plaintext password.
    pub password: Option<String>,
}

/// Credential body for `POST /api/token/`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenRequest {
    /// Login name.
    pub username: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Token issuance response.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    /// Bearer token key for `Authorization: Token <key>`.
    #[schema(value_type = String)]
    pub token: TokenKey,
}

fn map_account_validation_error(err: AccountValidationError) -> Error {
    match err {
        AccountValidationError::EmptyUsername
        | AccountValidationError::EmptyEmail
        | AccountValidationError::EmptyPassword => {
            Error::invalid_request("Please provide username, password, and email")
        }
        other => Error::invalid_request(other.to_string()),
    }
}

fn parse_create_user(request: CreateUserRequest) -> Result<NewAccount, Error> {
    let CreateUserRequest {
        username,
        password,
        email,
        age,
        country,
        residence,
    } = request;
    let (Some(username), Some(password), Some(email)) = (username, password, email) else {
        return Err(Error::invalid_request(
            "Please provide username, password, and email",
        ));
    };
    if password.trim().is_empty() {
        return Err(map_account_validation_error(
            AccountValidationError::EmptyPassword,
        ));
    }
    Ok(NewAccount {
        username: Username::new(username).map_err(map_account_validation_error)?,
        email: Email::new(email).map_err(map_account_validation_error)?,
        password,
        age,
        country,
        residence,
    })
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/create_user/",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Missing or conflicting credentials", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "createUser",
    security([])
)]
#[post("/create_user/")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let account = parse_create_user(payload.into_inner())?;
    state.accounts.register(account).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("User created successfully")))
}

/// Reset a user's password.
#[utoipa::path(
    post,
    path = "/api/reset_password/",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password replaced", body = MessageResponse),
        (status = 400, description = "Missing fields", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "resetPassword",
    security([])
)]
#[post("/reset_password/")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    payload: web::Json<ResetPasswordRequest>,
) -> ApiResult<HttpResponse> {
    let ResetPasswordRequest { username, password } = payload.into_inner();
    let (Some(username), Some(password)) = (username, password) else {
        return Err(Error::invalid_request("Username and password are required"));
    };
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(Error::invalid_request("Username and password are required"));
    }
    let username = Username::new(username).map_err(map_account_validation_error)?;
    state.accounts.reset_password(&username, &password).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset successfully")))
}

/// Exchange credentials for the user's bearer token.
#[utoipa::path(
    post,
    path = "/api/token/",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing or invalid credentials", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "obtainToken",
    security([])
)]
#[post("/token/")]
pub async fn obtain_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let TokenRequest { username, password } = payload.into_inner();
    let (Some(username), Some(password)) = (username, password) else {
        return Err(Error::invalid_request("Username and password are required"));
    };
    let token = state.accounts.issue_token(&username, &password).await?;
    Ok(web::Json(TokenResponse { token }))
}
