//! User identity and account value types.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when constructing account value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// Username is empty after trimming whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeds the storage limit.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Email is empty after trimming whitespace.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email does not look like an address.
    #[error("email must contain '@'")]
    InvalidEmail,
    /// Password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Maximum accepted username length.
pub const USERNAME_MAX: usize = 150;

/// Unique login name for a user.
///
/// # Examples
/// ```
/// use backend::domain::Username;
///
/// let name = Username::new("ada").expect("valid username");
/// assert_eq!(name.as_ref(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, AccountValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }
        if value.chars().count() > USERNAME_MAX {
            return Err(AccountValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact address for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// Only shape is checked here; deliverability is out of scope.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if !value.contains('@') {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// The password credential is deliberately absent: hashes never leave the
/// persistence layer except through [`crate::domain::ports::StoredCredentials`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
    /// Unique contact address.
    pub email: Email,
    /// Optional age.
    pub age: Option<i32>,
    /// Optional country.
    pub country: Option<String>,
    /// Optional city of residence.
    pub residence: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn username_rejects_blank(#[case] value: &str) {
        let err = Username::new(value).expect_err("blank usernames rejected");
        assert_eq!(err, AccountValidationError::EmptyUsername);
    }

    #[rstest]
    fn username_rejects_overlong() {
        let long = "x".repeat(USERNAME_MAX + 1);
        let err = Username::new(long).expect_err("overlong usernames rejected");
        assert!(matches!(err, AccountValidationError::UsernameTooLong { .. }));
    }

    #[rstest]
    fn username_accepts_clean_input() {
        let name = Username::new("test_user").expect("valid username");
        assert_eq!(name.to_string(), "test_user");
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyEmail)]
    #[case("not-an-address", AccountValidationError::InvalidEmail)]
    fn email_rejects_bad_shapes(#[case] value: &str, #[case] expected: AccountValidationError) {
        let err = Email::new(value).expect_err("bad emails rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn email_accepts_addresses() {
        let email = Email::new("test@example.com").expect("valid email");
        assert_eq!(email.as_ref(), "test@example.com");
    }
}
