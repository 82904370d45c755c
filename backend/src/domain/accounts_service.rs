//! Account lifecycle domain service: registration, password reset, and
//! bearer-token issuance and resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AccountsCommand, NewAccount, NewUserRecord, PasswordHasher, TokenAuth, TokenKey,
    TokenRepository, UserInsertError, UserRepository, map_store_error,
};
use crate::domain::{Error, UserId, Username};

/// Accounts service implementing the [`AccountsCommand`] and [`TokenAuth`]
/// ports.
#[derive(Clone)]
pub struct AccountsService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U, T> AccountsService<U, T> {
    /// Create a new service backed by the given repositories and hasher.
    pub fn new(users: Arc<U>, tokens: Arc<T>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }
}

#[async_trait]
impl<U, T> AccountsCommand for AccountsService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    async fn register(&self, account: NewAccount) -> Result<UserId, Error> {
        let NewAccount {
            username,
            email,
            password,
            age,
            country,
            residence,
        } = account;
        let record = NewUserRecord {
            username,
            email,
            password_hash: self.hasher.hash(&password),
            age,
            country,
            residence,
        };

        let user_id = self.users.insert(record).await.map_err(|err| match err {
            UserInsertError::DuplicateUsername => Error::conflict("Username already exists"),
            UserInsertError::DuplicateEmail => Error::conflict("Email already exists"),
            UserInsertError::Store(store) => map_store_error(store),
        })?;
        info!(user = %user_id, "user registered");
        Ok(user_id)
    }

    async fn reset_password(&self, username: &Username, password: &str) -> Result<(), Error> {
        let Some(credentials) = self
            .users
            .credentials_by_username(username.as_ref())
            .await
            .map_err(map_store_error)?
        else {
            return Err(Error::not_found("User does not exist"));
        };

        self.users
            .update_password_hash(&credentials.user_id, &self.hasher.hash(password))
            .await
            .map_err(map_store_error)
    }

    async fn issue_token(&self, username: &str, password: &str) -> Result<TokenKey, Error> {
        let credentials = self
            .users
            .credentials_by_username(username)
            .await
            .map_err(map_store_error)?;

        // Same failure for an unknown username and a wrong password; the
        // token endpoint must not reveal which part was wrong.
        let Some(credentials) = credentials else {
            return Err(Error::invalid_request(
                "Unable to log in with provided credentials",
            ));
        };
        if !self.hasher.verify(password, &credentials.password_hash) {
            return Err(Error::invalid_request(
                "Unable to log in with provided credentials",
            ));
        }

        self.tokens
            .get_or_create(&credentials.user_id)
            .await
            .map_err(map_store_error)
    }
}

#[async_trait]
impl<U, T> TokenAuth for AccountsService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    async fn authenticate(&self, key: &str) -> Result<UserId, Error> {
        let user = self.tokens.find_user(key).await.map_err(map_store_error)?;
        user.ok_or_else(|| Error::unauthorized("Invalid token"))
    }
}

#[cfg(test)]
#[path = "accounts_service_tests.rs"]
mod tests;
