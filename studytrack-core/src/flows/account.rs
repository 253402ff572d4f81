/// Account flow controller
///
/// Orchestrates registration, login, logout, and the user listing on top of
/// the identity service. Invalid submissions short-circuit to a re-render
/// before the identity service is touched; only clean input reaches it.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use studytrack_core::flows::account::AccountFlow;
/// use studytrack_core::flows::forms::RegisterForm;
/// use studytrack_core::flows::outcome::{Outcome, Target};
/// use studytrack_core::identity::memory::MemoryIdentity;
/// use studytrack_core::identity::session::SessionSlot;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let flow = AccountFlow::new(Arc::new(MemoryIdentity::new()));
///
/// let form = RegisterForm {
///     full_name: "Alice A".to_string(),
///     email: "alice@mail.com".to_string(),
///     password: "Test123!".to_string(),
///     confirm_password: "Test123!".to_string(),
/// };
///
/// let mut session = SessionSlot::empty();
/// match flow.register(form, Vec::new(), &mut session).await? {
///     Outcome::Redirect(Target::Home) => println!("Registered and signed in"),
///     other => println!("Rejected: {:?}", other),
/// }
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use validator::Validate;

use crate::error::{FieldError, FlowError};
use crate::flows::forms::{collect_errors, LoginForm, RegisterForm};
use crate::flows::outcome::{Outcome, Target};
use crate::identity::service::{IdentityService, SignInOutcome, Signup, UserCreation};
use crate::identity::session::SessionSlot;
use crate::models::user::UserSummary;

/// Flow controller for registration, login, and logout
pub struct AccountFlow {
    identity: Arc<dyn IdentityService>,
}

impl AccountFlow {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity }
    }

    /// Shows the empty registration form
    pub fn show_register(&self) -> Outcome<RegisterForm> {
        Outcome::render(RegisterForm::default())
    }

    /// Handles a registration submission
    ///
    /// `prior_errors` carries validation errors the caller already knows
    /// about (for example a body that failed to parse); any at all
    /// short-circuit to a re-render without touching the identity service.
    /// On success the new user is signed in and sent to the home page.
    pub async fn register(
        &self,
        form: RegisterForm,
        prior_errors: Vec<FieldError>,
        session: &mut SessionSlot,
    ) -> Result<Outcome<RegisterForm>, FlowError> {
        let mut errors = prior_errors;
        errors.extend(collect_errors(form.validate()));

        if form.password != form.confirm_password {
            errors.push(FieldError::new(
                "confirm_password",
                "Passwords do not match",
            ));
        }

        if !errors.is_empty() {
            return Ok(Outcome::render_with_errors(form, errors));
        }

        let signup = Signup {
            username: form.email.clone(),
            email: form.email.clone(),
            full_name: form.full_name.clone(),
        };

        match self.identity.create_user(signup, &form.password).await? {
            UserCreation::Created(user) => {
                self.identity.sign_in(&user, false, session).await?;
                Ok(Outcome::Redirect(Target::Home))
            }
            UserCreation::Rejected(errors) => Ok(Outcome::render_with_errors(form, errors)),
        }
    }

    /// Shows the empty login form
    pub fn show_login(&self) -> Outcome<LoginForm> {
        Outcome::render(LoginForm::default())
    }

    /// Handles a login submission
    ///
    /// Failed credentials re-render with one generic message; the response
    /// never reveals whether the email exists.
    pub async fn login(
        &self,
        form: LoginForm,
        prior_errors: Vec<FieldError>,
        session: &mut SessionSlot,
    ) -> Result<Outcome<LoginForm>, FlowError> {
        let mut errors = prior_errors;
        errors.extend(collect_errors(form.validate()));

        if !errors.is_empty() {
            return Ok(Outcome::render_with_errors(form, errors));
        }

        let outcome = self
            .identity
            .password_sign_in(&form.email, &form.password, form.remember_me, session)
            .await?;

        match outcome {
            SignInOutcome::Succeeded => Ok(Outcome::Redirect(Target::Home)),
            SignInOutcome::Failed => Ok(Outcome::render_with_errors(
                form,
                vec![FieldError::new("", "Invalid email or password")],
            )),
        }
    }

    /// Signs the current session out
    ///
    /// Always lands on the login form, signed in or not.
    pub fn logout(&self, session: &mut SessionSlot) -> Target {
        self.identity.sign_out(session);
        Target::Login
    }

    /// Lists every registered user as a public summary
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, FlowError> {
        let users = self.identity.users().await?;
        Ok(users.iter().map(UserSummary::from).collect())
    }
}
