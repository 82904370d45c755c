//! In-memory implementations of the driven ports for unit tests.
//!
//! A single [`InMemoryStore`] backs every repository trait so cross-aggregate
//! interactions (accepting an interest mutates the project, deleting a
//! project cascades its interests) behave like the relational store. All
//! state sits behind one mutex, which also gives the conditional mutations
//! the atomicity the real adapters get from transactions.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    DecisionError, InterestDetails, InterestInsertError, InterestRepository, InterestedUser,
    NewProjectRecord, NewUserRecord, PasswordHasher, ProjectInsertError, ProjectRepository,
    SkillAttachError, SkillRepository, StoreError, StoredCredentials, TokenKey, TokenRepository,
    UserInsertError, UserRepository,
};
use crate::domain::{
    Email, ExpressionOfInterest, InterestId, InterestStatus, Project, ProjectId, ProjectStatus,
    SKILL_LIMIT, SkillId, SkillName, User, UserId, Username,
};

struct UserRecord {
    id: UserId,
    username: String,
    email: String,
    password_hash: String,
    age: Option<i32>,
    country: Option<String>,
    residence: Option<String>,
}

struct SkillRecord {
    id: SkillId,
    name: String,
}

#[derive(Default)]
struct State {
    users: Vec<UserRecord>,
    skills: Vec<SkillRecord>,
    user_skills: Vec<(UserId, SkillId)>,
    projects: Vec<Project>,
    collaborators: Vec<(ProjectId, UserId)>,
    interests: Vec<ExpressionOfInterest>,
    tokens: Vec<(String, UserId)>,
}

/// Shared in-memory store implementing every driven port.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with a deterministic token, returning both.
    pub fn seed_user(&self, username: &str) -> (UserId, TokenKey) {
        let id = UserId::random();
        let key = format!("token-{username}");
        let mut state = self.state.lock().expect("store lock");
        state.users.push(UserRecord {
            id,
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password_hash: "plain$password".to_owned(),
            age: None,
            country: None,
            residence: None,
        });
        state.tokens.push((key.clone(), id));
        (id, TokenKey::new(key))
    }

    /// Live collaborator count for a project.
    pub fn collaborator_count(&self, project_id: &ProjectId) -> usize {
        let state = self.state.lock().expect("store lock");
        state
            .collaborators
            .iter()
            .filter(|(p, _)| p == project_id)
            .count()
    }

    /// Snapshot a project aggregate.
    pub fn project(&self, project_id: &ProjectId) -> Option<Project> {
        let state = self.state.lock().expect("store lock");
        state.projects.iter().find(|p| p.id == *project_id).cloned()
    }

    /// Snapshot an expression of interest.
    pub fn interest(&self, eoi_id: &InterestId) -> Option<ExpressionOfInterest> {
        let state = self.state.lock().expect("store lock");
        state.interests.iter().find(|i| i.id == *eoi_id).cloned()
    }

    /// Whether a user is in a project's collaborator set.
    pub fn is_collaborator(&self, project_id: &ProjectId, user_id: &UserId) -> bool {
        let state = self.state.lock().expect("store lock");
        state
            .collaborators
            .iter()
            .any(|(p, u)| p == project_id && u == user_id)
    }

    /// Number of skills a user holds.
    pub fn skill_count(&self, user_id: &UserId) -> usize {
        let state = self.state.lock().expect("store lock");
        state
            .user_skills
            .iter()
            .filter(|(u, _)| u == user_id)
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: NewUserRecord) -> Result<UserId, UserInsertError> {
        let mut state = self.state.lock().expect("store lock");
        if state
            .users
            .iter()
            .any(|u| u.username == user.username.as_ref())
        {
            return Err(UserInsertError::DuplicateUsername);
        }
        if state.users.iter().any(|u| u.email == user.email.as_ref()) {
            return Err(UserInsertError::DuplicateEmail);
        }
        let id = UserId::random();
        state.users.push(UserRecord {
            id,
            username: user.username.into(),
            email: user.email.into(),
            password_hash: user.password_hash,
            age: user.age,
            country: user.country,
            residence: user.residence,
        });
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| User {
                id: u.id,
                username: Username::new(u.username.clone()).expect("stored username valid"),
                email: Email::new(u.email.clone()).expect("stored email valid"),
                age: u.age,
                country: u.country.clone(),
                residence: u.residence.clone(),
            }))
    }

    async fn credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| StoredCredentials {
                user_id: u.id,
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("store lock");
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == *user_id)
            .ok_or_else(|| StoreError::query("user not found"))?;
        user.password_hash = password_hash.to_owned();
        Ok(())
    }
}

#[async_trait]
impl SkillRepository for InMemoryStore {
    async fn add_to_user(
        &self,
        user_id: &UserId,
        name: &SkillName,
    ) -> Result<(), SkillAttachError> {
        let mut state = self.state.lock().expect("store lock");
        let held = state
            .user_skills
            .iter()
            .filter(|(u, _)| u == user_id)
            .count();
        if held >= SKILL_LIMIT {
            return Err(SkillAttachError::LimitExceeded);
        }
        let skill_id = match state.skills.iter().find(|s| s.name == name.as_ref()) {
            Some(skill) => skill.id,
            None => {
                let id = SkillId::random();
                state.skills.push(SkillRecord {
                    id,
                    name: name.as_ref().to_owned(),
                });
                id
            }
        };
        if state
            .user_skills
            .iter()
            .any(|(u, s)| u == user_id && *s == skill_id)
        {
            return Err(SkillAttachError::AlreadyHeld);
        }
        state.user_skills.push((*user_id, skill_id));
        Ok(())
    }

    async fn find_by_name(&self, name: &SkillName) -> Result<Option<SkillId>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .skills
            .iter()
            .find(|s| s.name == name.as_ref())
            .map(|s| s.id))
    }

    async fn remove_from_user(
        &self,
        user_id: &UserId,
        skill_id: &SkillId,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().expect("store lock");
        let before = state.user_skills.len();
        state
            .user_skills
            .retain(|(u, s)| !(u == user_id && s == skill_id));
        Ok(state.user_skills.len() < before)
    }

    async fn names_for_user(&self, user_id: &UserId) -> Result<Vec<String>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .user_skills
            .iter()
            .filter(|(u, _)| u == user_id)
            .filter_map(|(_, skill_id)| {
                state
                    .skills
                    .iter()
                    .find(|s| s.id == *skill_id)
                    .map(|s| s.name.clone())
            })
            .collect())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn insert(&self, project: NewProjectRecord) -> Result<Project, ProjectInsertError> {
        let mut state = self.state.lock().expect("store lock");
        if state
            .projects
            .iter()
            .any(|p| p.name.as_ref() == project.name.as_ref())
        {
            return Err(ProjectInsertError::DuplicateName);
        }
        let created = Project {
            id: ProjectId::random(),
            name: project.name,
            description: project.description,
            maximum_collaborators: project.maximum_collaborators,
            current_collaborators: 0,
            creator_id: project.creator_id,
            status: ProjectStatus::Draft,
        };
        state.projects.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state.projects.iter().find(|p| p.id == *id).cloned())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("store lock");
        state.projects.retain(|p| p.id != *id);
        state.interests.retain(|i| i.project_id != *id);
        state.collaborators.retain(|(p, _)| p != id);
        Ok(())
    }

    async fn close(&self, id: &ProjectId) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("store lock");
        if let Some(project) = state.projects.iter_mut().find(|p| p.id == *id) {
            project.status = ProjectStatus::Closed;
        }
        Ok(())
    }

    async fn list_available(
        &self,
    ) -> Result<Vec<crate::domain::ports::AvailableProject>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .projects
            .iter()
            .filter_map(|project| {
                let live = state
                    .collaborators
                    .iter()
                    .filter(|(p, _)| *p == project.id)
                    .count() as i64;
                if live >= i64::from(project.maximum_collaborators.get()) {
                    return None;
                }
                let creator = state
                    .users
                    .iter()
                    .find(|u| u.id == project.creator_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default();
                Some(crate::domain::ports::AvailableProject {
                    id: project.id,
                    project_name: project.name.as_ref().to_owned(),
                    description: project.description.clone(),
                    maximum_collaborators: project.maximum_collaborators.get(),
                    current_collaborators: live,
                    creator,
                    status: project.status,
                })
            })
            .collect())
    }

    async fn created_project_names(&self, user_id: &UserId) -> Result<Vec<String>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .projects
            .iter()
            .filter(|p| p.creator_id == *user_id)
            .map(|p| p.name.as_ref().to_owned())
            .collect())
    }

    async fn collaboration_names(&self, user_id: &UserId) -> Result<Vec<String>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .collaborators
            .iter()
            .filter(|(_, u)| u == user_id)
            .filter_map(|(project_id, _)| {
                state
                    .projects
                    .iter()
                    .find(|p| p.id == *project_id)
                    .map(|p| p.name.as_ref().to_owned())
            })
            .collect())
    }
}

#[async_trait]
impl InterestRepository for InMemoryStore {
    async fn insert_pending(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<ExpressionOfInterest, InterestInsertError> {
        let mut state = self.state.lock().expect("store lock");
        let active_exists = state.interests.iter().any(|i| {
            i.user_id == *user_id
                && i.project_id == *project_id
                && matches!(i.status, InterestStatus::Pending | InterestStatus::Accepted)
        });
        if active_exists {
            return Err(InterestInsertError::AlreadyExpressed);
        }
        let interest = ExpressionOfInterest {
            id: InterestId::random(),
            user_id: *user_id,
            project_id: *project_id,
            status: InterestStatus::Pending,
            created_at: Utc::now(),
        };
        state.interests.push(interest.clone());
        Ok(interest)
    }

    async fn find_with_project(
        &self,
        project_id: &ProjectId,
        eoi_id: &InterestId,
    ) -> Result<Option<(ExpressionOfInterest, Project)>, StoreError> {
        let state = self.state.lock().expect("store lock");
        let interest = state
            .interests
            .iter()
            .find(|i| i.id == *eoi_id && i.project_id == *project_id)
            .cloned();
        Ok(interest.and_then(|interest| {
            state
                .projects
                .iter()
                .find(|p| p.id == interest.project_id)
                .cloned()
                .map(|project| (interest, project))
        }))
    }

    async fn accept(&self, eoi_id: &InterestId) -> Result<(), DecisionError> {
        let mut state = self.state.lock().expect("store lock");
        let (user_id, project_id, status) = state
            .interests
            .iter()
            .find(|i| i.id == *eoi_id)
            .map(|i| (i.user_id, i.project_id, i.status))
            .ok_or(DecisionError::NotFound)?;
        if status != InterestStatus::Pending {
            return Err(DecisionError::NotPending);
        }
        {
            let project = state
                .projects
                .iter()
                .find(|p| p.id == project_id)
                .ok_or(DecisionError::NotFound)?;
            if project.is_full() {
                return Err(DecisionError::ProjectFull);
            }
        }

        if let Some(interest) = state.interests.iter_mut().find(|i| i.id == *eoi_id) {
            interest.status = InterestStatus::Accepted;
        }
        state.collaborators.push((project_id, user_id));
        if let Some(project) = state.projects.iter_mut().find(|p| p.id == project_id) {
            project.current_collaborators += 1;
            if project.current_collaborators == 1 {
                project.status = ProjectStatus::Active;
            }
        }
        Ok(())
    }

    async fn reject(&self, eoi_id: &InterestId) -> Result<(), DecisionError> {
        let mut state = self.state.lock().expect("store lock");
        let (user_id, project_id, status) = state
            .interests
            .iter()
            .find(|i| i.id == *eoi_id)
            .map(|i| (i.user_id, i.project_id, i.status))
            .ok_or(DecisionError::NotFound)?;
        if status != InterestStatus::Pending {
            return Err(DecisionError::NotPending);
        }

        if let Some(interest) = state.interests.iter_mut().find(|i| i.id == *eoi_id) {
            interest.status = InterestStatus::Rejected;
        }
        let before = state.collaborators.len();
        state
            .collaborators
            .retain(|(p, u)| !(*p == project_id && *u == user_id));
        if state.collaborators.len() < before {
            if let Some(project) = state.projects.iter_mut().find(|p| p.id == project_id) {
                project.current_collaborators -= 1;
            }
        }
        Ok(())
    }

    async fn details_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<InterestDetails>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .interests
            .iter()
            .filter(|i| i.project_id == *project_id)
            .map(|interest| {
                let user = state.users.iter().find(|u| u.id == interest.user_id);
                let programming_skills = state
                    .user_skills
                    .iter()
                    .filter(|(u, _)| *u == interest.user_id)
                    .filter_map(|(_, skill_id)| {
                        state
                            .skills
                            .iter()
                            .find(|s| s.id == *skill_id)
                            .map(|s| s.name.clone())
                    })
                    .collect();
                InterestDetails {
                    id: interest.id,
                    user_details: InterestedUser {
                        username: user.map(|u| u.username.clone()).unwrap_or_default(),
                        email: user.map(|u| u.email.clone()).unwrap_or_default(),
                        programming_skills,
                    },
                    status: interest.status,
                    created_at: interest.created_at,
                }
            })
            .collect())
    }

    async fn interest_project_names(&self, user_id: &UserId) -> Result<Vec<String>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .interests
            .iter()
            .filter(|i| i.user_id == *user_id)
            .filter_map(|interest| {
                state
                    .projects
                    .iter()
                    .find(|p| p.id == interest.project_id)
                    .map(|p| p.name.as_ref().to_owned())
            })
            .collect())
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn get_or_create(&self, user_id: &UserId) -> Result<TokenKey, StoreError> {
        let mut state = self.state.lock().expect("store lock");
        if let Some((key, _)) = state.tokens.iter().find(|(_, u)| u == user_id) {
            return Ok(TokenKey::new(key.clone()));
        }
        let key = format!("key-{}", uuid::Uuid::new_v4().simple());
        state.tokens.push((key.clone(), *user_id));
        Ok(TokenKey::new(key))
    }

    async fn find_user(&self, key: &str) -> Result<Option<UserId>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .tokens
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, user_id)| *user_id))
    }
}

/// Transparent hasher for tests; hashes are `plain$<password>`.
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, password: &str) -> String {
        format!("plain${password}")
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        stored == format!("plain${password}")
    }
}
