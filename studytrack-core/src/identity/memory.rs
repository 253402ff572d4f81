/// In-memory identity service
///
/// Backs the flow-controller and web tests without a database. Validation,
/// password hashing, and session issuance go through the same code as
/// [`PgIdentity`](crate::identity::pg::PgIdentity); only user storage is
/// swapped for a vector behind a lock, so a test that passes here exercises
/// the real credential path.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::FieldError;
use crate::identity::password::{hash_password, verify_password};
use crate::identity::principal::Principal;
use crate::identity::service::{
    validate_signup, IdentityError, IdentityService, SignInOutcome, Signup, UserCreation,
};
use crate::identity::session::{SessionRegistry, SessionSlot};
use crate::models::user::User;

/// Identity service holding users in process memory
pub struct MemoryIdentity {
    users: RwLock<Vec<User>>,
    sessions: Arc<SessionRegistry>,
}

impl MemoryIdentity {
    /// Creates an empty identity service with default session lifetimes
    pub fn new() -> Self {
        Self::with_sessions(Arc::new(SessionRegistry::default()))
    }

    /// Creates an empty identity service sharing an existing session registry
    pub fn with_sessions(sessions: Arc<SessionRegistry>) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            sessions,
        }
    }
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityService for MemoryIdentity {
    async fn create_user(
        &self,
        signup: Signup,
        password: &str,
    ) -> Result<UserCreation, IdentityError> {
        let mut errors = validate_signup(&signup, password);

        if errors.is_empty() && self.find_by_email(&signup.email).await?.is_some() {
            errors.push(FieldError::new("email", "Email is already registered"));
        }

        if !errors.is_empty() {
            return Ok(UserCreation::Rejected(errors));
        }

        let password_hash = hash_password(password)?;

        let user = User {
            id: Uuid::new_v4(),
            username: signup.username,
            email: signup.email,
            full_name: signup.full_name,
            password_hash,
            created_at: Utc::now(),
        };

        self.users.write().push(user.clone());
        Ok(UserCreation::Created(user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityError> {
        let user = self
            .users
            .read()
            .iter()
            .find(|u| u.email == email)
            .cloned();

        Ok(user)
    }

    async fn password_sign_in(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
        session: &mut SessionSlot,
    ) -> Result<SignInOutcome, IdentityError> {
        let user = match self.find_by_email(email).await? {
            Some(user) => user,
            None => return Ok(SignInOutcome::Failed),
        };

        if !verify_password(password, &user.password_hash)? {
            return Ok(SignInOutcome::Failed);
        }

        self.sign_in(&user, remember_me, session).await?;
        Ok(SignInOutcome::Succeeded)
    }

    async fn sign_in(
        &self,
        user: &User,
        persistent: bool,
        session: &mut SessionSlot,
    ) -> Result<(), IdentityError> {
        let principal = Principal::new(user.id, user.email.clone());
        let token = self.sessions.issue(principal, persistent);
        session.establish(token, persistent);
        Ok(())
    }

    fn sign_out(&self, session: &mut SessionSlot) {
        if let Some(token) = session.token() {
            self.sessions.revoke(token);
        }
        session.clear();
    }

    fn resolve_principal(&self, token: &str) -> Option<Principal> {
        self.sessions.resolve(token)
    }

    async fn current_user(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Option<User>, IdentityError> {
        let principal = match principal {
            Some(principal) => principal,
            None => return Ok(None),
        };

        let user = self
            .users
            .read()
            .iter()
            .find(|u| u.id == principal.user_id)
            .cloned();

        Ok(user)
    }

    async fn users(&self) -> Result<Vec<User>, IdentityError> {
        Ok(self.users.read().clone())
    }
}
