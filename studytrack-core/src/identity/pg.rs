/// PostgreSQL-backed identity service
///
/// Stores users in the `users` table and issues sessions through the shared
/// in-process [`SessionRegistry`]. Duplicate emails are rejected twice: a
/// pre-check keeps the common case out of the database error path, and the
/// unique constraint on `users.email` catches the concurrent-registration
/// race.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::FieldError;
use crate::identity::password::{hash_password, verify_password};
use crate::identity::principal::Principal;
use crate::identity::service::{
    validate_signup, IdentityError, IdentityService, SignInOutcome, Signup, UserCreation,
};
use crate::identity::session::{SessionRegistry, SessionSlot};
use crate::models::user::User;

/// Identity service backed by PostgreSQL
pub struct PgIdentity {
    pool: PgPool,
    sessions: Arc<SessionRegistry>,
}

impl PgIdentity {
    /// Creates an identity service with default session lifetimes
    pub fn new(pool: PgPool) -> Self {
        Self::with_sessions(pool, Arc::new(SessionRegistry::default()))
    }

    /// Creates an identity service sharing an existing session registry
    pub fn with_sessions(pool: PgPool, sessions: Arc<SessionRegistry>) -> Self {
        Self { pool, sessions }
    }
}

#[async_trait]
impl IdentityService for PgIdentity {
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

        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, full_name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, full_name, password_hash, created_at
            "#,
        )
        .bind(&signup.username)
        .bind(&signup.email)
        .bind(&signup.full_name)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await;

        let user = match inserted {
            Ok(user) => user,
            Err(sqlx::Error::Database(db_err)) => {
                // Concurrent registration for the same email slipped past the
                // pre-check; the unique constraint reports it instead
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return Ok(UserCreation::Rejected(vec![FieldError::new(
                            "email",
                            "Email is already registered",
                        )]));
                    }
                }
                return Err(sqlx::Error::Database(db_err).into());
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, "Registered new user");
        Ok(UserCreation::Created(user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, full_name, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

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
            None => {
                debug!("Sign-in attempt for unknown email");
                return Ok(SignInOutcome::Failed);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "Sign-in attempt with wrong password");
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

        debug!(user_id = %user.id, persistent, "Session established");
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

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, full_name, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(principal.user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn users(&self) -> Result<Vec<User>, IdentityError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, full_name, password_hash, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
