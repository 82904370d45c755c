//! Expression-of-interest domain service: expression and the accept/reject
//! state machine.
//!
//! The decision path checks failures in the order the public contract
//! promises: existence, authorization, already-decided, action validity,
//! then capacity. Capacity is re-checked by the repository inside the
//! decision transaction with the project row locked, so two concurrent
//! accepts serialize on the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    DecisionError, InterestDetails, InterestInsertError, InterestRepository, InterestsCommand,
    InterestsQuery, ProjectRepository, map_store_error,
};
use crate::domain::{
    DecisionAction, Error, ExpressionOfInterest, InterestId, InterestStatus, ProjectId, UserId,
};

/// Interest lifecycle service implementing the [`InterestsCommand`] and
/// [`InterestsQuery`] ports.
#[derive(Clone)]
pub struct InterestsService<I, P> {
    interests: Arc<I>,
    projects: Arc<P>,
}

impl<I, P> InterestsService<I, P> {
    /// Create a new service backed by the given repositories.
    pub fn new(interests: Arc<I>, projects: Arc<P>) -> Self {
        Self { interests, projects }
    }
}

/// Map decision-transaction failures to the public error vocabulary.
fn map_decision_error(error: DecisionError) -> Error {
    match error {
        DecisionError::NotFound => Error::not_found("Expression of interest not found"),
        // A concurrent decision won the race between our snapshot and the
        // transaction; surface it the same way as a stale re-decision.
        DecisionError::NotPending => Error::conflict("Interest has already been decided"),
        DecisionError::ProjectFull => Error::conflict("Project is already full"),
        DecisionError::Store(store) => map_store_error(store),
    }
}

#[async_trait]
impl<I, P> InterestsCommand for InterestsService<I, P>
where
    I: InterestRepository,
    P: ProjectRepository,
{
    async fn express(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<ExpressionOfInterest, Error> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(map_store_error)?;
        if project.is_none() {
            return Err(Error::not_found("Project does not exist"));
        }

        self.interests
            .insert_pending(user_id, project_id)
            .await
            .map_err(|err| match err {
                InterestInsertError::AlreadyExpressed => {
                    Error::conflict("User has already expressed interest in this project")
                }
                InterestInsertError::Store(store) => map_store_error(store),
            })
    }

    async fn decide(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
        eoi_id: &InterestId,
        action: Option<&str>,
    ) -> Result<DecisionAction, Error> {
        let Some((interest, project)) = self
            .interests
            .find_with_project(project_id, eoi_id)
            .await
            .map_err(map_store_error)?
        else {
            return Err(Error::not_found("Expression of interest not found"));
        };

        if project.creator_id != *requester {
            return Err(Error::forbidden(
                "Only the creator of the project can accept or reject interests",
            ));
        }

        match interest.status {
            InterestStatus::Pending => {}
            InterestStatus::Accepted => {
                return Err(Error::conflict("User is already accepted for this project"));
            }
            InterestStatus::Rejected => {
                return Err(Error::conflict("Interest has already been decided"));
            }
        }

        let Some(action) = action.and_then(DecisionAction::parse) else {
            return Err(Error::invalid_request("Invalid action"));
        };

        match action {
            DecisionAction::Accept => {
                self.interests
                    .accept(eoi_id)
                    .await
                    .map_err(map_decision_error)?;
                info!(eoi = %eoi_id, project = %project_id, "interest accepted");
            }
            DecisionAction::Reject => {
                self.interests
                    .reject(eoi_id)
                    .await
                    .map_err(map_decision_error)?;
                info!(eoi = %eoi_id, project = %project_id, "interest rejected");
            }
        }
        Ok(action)
    }
}

#[async_trait]
impl<I, P> InterestsQuery for InterestsService<I, P>
where
    I: InterestRepository,
    P: ProjectRepository,
{
    async fn list_for_project(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
    ) -> Result<Vec<InterestDetails>, Error> {
        // Answer not-found for foreign projects as well, so a probing caller
        // cannot distinguish "absent" from "not mine".
        let project = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(map_store_error)?;
        match project {
            Some(project) if project.creator_id == *requester => self
                .interests
                .details_for_project(project_id)
                .await
                .map_err(map_store_error),
            _ => Err(Error::not_found("Project does not exist")),
        }
    }
}

#[cfg(test)]
#[path = "interests_service_tests.rs"]
mod tests;
