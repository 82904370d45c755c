//! Skill assignment domain service.
//!
//! Enforces the three-skill cap and per-user uniqueness. Skill rows are
//! created lazily on first use and never deleted; removing a skill only
//! removes the user's association.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{SkillAttachError, SkillRepository, SkillsCommand, map_store_error};
use crate::domain::{Error, SkillName, UserId};

/// Skill assignment service implementing the [`SkillsCommand`] port.
#[derive(Clone)]
pub struct SkillsService<S> {
    skills: Arc<S>,
}

impl<S> SkillsService<S> {
    /// Create a new service backed by the given repository.
    pub fn new(skills: Arc<S>) -> Self {
        Self { skills }
    }
}

#[async_trait]
impl<S> SkillsCommand for SkillsService<S>
where
    S: SkillRepository,
{
    async fn add_skill(&self, user_id: &UserId, name: &SkillName) -> Result<(), Error> {
        self.skills
            .add_to_user(user_id, name)
            .await
            .map_err(|err| match err {
                SkillAttachError::LimitExceeded => Error::conflict("Maximum three skills allowed"),
                SkillAttachError::AlreadyHeld => {
                    Error::conflict(format!("Skill \"{name}\" already added"))
                }
                SkillAttachError::Store(store) => map_store_error(store),
            })
    }

    async fn remove_skill(&self, user_id: &UserId, name: &SkillName) -> Result<(), Error> {
        let Some(skill_id) = self
            .skills
            .find_by_name(name)
            .await
            .map_err(map_store_error)?
        else {
            return Err(Error::not_found("Skill does not exist"));
        };

        let removed = self
            .skills
            .remove_from_user(user_id, &skill_id)
            .await
            .map_err(map_store_error)?;
        if !removed {
            return Err(Error::conflict("User does not have this skill"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "skills_service_tests.rs"]
mod tests;
