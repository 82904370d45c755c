//! Programming skill value types.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of skills a user may hold at once.
pub const SKILL_LIMIT: usize = 3;

/// Maximum accepted skill name length.
pub const SKILL_NAME_MAX: usize = 100;

/// Validation errors returned when constructing a [`SkillName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillValidationError {
    /// Name is empty after trimming whitespace.
    #[error("skill name must not be empty")]
    EmptyName,
    /// Name exceeds the storage limit.
    #[error("skill name must be at most {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

/// Stable skill identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillId(Uuid);

impl SkillId {
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

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Name of a programming skill, created lazily the first time any user adds
/// a skill by that name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SkillName(String);

impl SkillName {
    /// Validate and construct a [`SkillName`].
    pub fn new(value: impl Into<String>) -> Result<Self, SkillValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SkillValidationError::EmptyName);
        }
        if value.chars().count() > SKILL_NAME_MAX {
            return Err(SkillValidationError::NameTooLong { max: SKILL_NAME_MAX });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for SkillName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SkillName> for String {
    fn from(value: SkillName) -> Self {
        value.0
    }
}

impl TryFrom<String> for SkillName {
    type Error = SkillValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
