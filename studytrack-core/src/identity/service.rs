/// Identity capability interface
///
/// Both flow controllers consume identity through this trait: account
/// registration and sign-in, principal resolution, and user lookups. The
/// surface is deliberately narrow so tests can swap in the in-memory
/// implementation without touching credential hashing or flow logic.
///
/// Implementations:
/// - [`PgIdentity`](crate::identity::pg::PgIdentity) - PostgreSQL-backed
/// - [`MemoryIdentity`](crate::identity::memory::MemoryIdentity) - in-memory, for tests

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::FieldError;
use crate::identity::password::{validate_password_strength, PasswordError};
use crate::identity::principal::Principal;
use crate::identity::session::SessionSlot;
use crate::models::user::User;

/// Error type for identity operations
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Input for registering a new account
///
/// The password travels separately so this struct can be logged or echoed
/// without ever carrying the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signup {
    /// Display name used as the task author snapshot
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Full name
    pub full_name: String,
}

/// Result of a registration attempt
#[derive(Debug, Clone, PartialEq)]
pub enum UserCreation {
    /// Account created and immediately queryable
    Created(User),

    /// Input rejected; nothing was persisted
    Rejected(Vec<FieldError>),
}

/// Result of a credential sign-in attempt
///
/// Wrong credentials are a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Credentials verified; a session was established
    Succeeded,

    /// Unknown email or wrong password
    Failed,
}

/// Operations the flow controllers require from identity
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Registers a new account
    ///
    /// Validates the signup fields and password strength, rejects duplicate
    /// emails, and hashes the password before storing. On success the user
    /// is immediately queryable.
    async fn create_user(
        &self,
        signup: Signup,
        password: &str,
    ) -> Result<UserCreation, IdentityError>;

    /// Looks up a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityError>;

    /// Verifies credentials and establishes a session on success
    ///
    /// Never fails for wrong credentials; that is [`SignInOutcome::Failed`].
    /// `remember_me` extends the session lifetime.
    async fn password_sign_in(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
        session: &mut SessionSlot,
    ) -> Result<SignInOutcome, IdentityError>;

    /// Establishes a session for an already-verified user
    ///
    /// Used right after registration so the new account lands signed in.
    async fn sign_in(
        &self,
        user: &User,
        persistent: bool,
        session: &mut SessionSlot,
    ) -> Result<(), IdentityError>;

    /// Revokes the request's session, if it has one
    fn sign_out(&self, session: &mut SessionSlot);

    /// Resolves a session token to its principal
    ///
    /// The request-handling layer calls this once per request and threads
    /// the result into the flow controllers explicitly.
    fn resolve_principal(&self, token: &str) -> Option<Principal>;

    /// Loads the user behind a resolved principal
    ///
    /// Returns `None` for an unauthenticated request or when the referenced
    /// user no longer exists.
    async fn current_user(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Option<User>, IdentityError>;

    /// Lists all registered users
    async fn users(&self) -> Result<Vec<User>, IdentityError>;
}

/// Validates signup fields and password strength
///
/// Shared by every [`IdentityService`] implementation so the in-memory fake
/// rejects exactly what the real one rejects. Duplicate-email checks stay in
/// the implementations because they need storage access.
pub fn validate_signup(signup: &Signup, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if signup.username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    }

    if signup.full_name.trim().is_empty() {
        errors.push(FieldError::new("full_name", "Full name is required"));
    }

    if signup.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !signup.email.validate_email() {
        errors.push(FieldError::new("email", "Email address is invalid"));
    }

    if let Err(message) = validate_password_strength(password) {
        errors.push(FieldError::new("password", message));
    }

    errors
}
