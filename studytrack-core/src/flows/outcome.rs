/// Flow operation outcomes
///
/// Every flow operation ends in one of two instructions: render a page from a
/// model, or redirect somewhere. The core names redirect destinations
/// abstractly; only the web layer knows their paths.

use crate::error::FieldError;

/// Navigation destinations a flow can redirect to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The home landing page
    Home,

    /// The login form
    Login,

    /// The signed-in user's task list
    TaskList,
}

/// Instruction returned by a flow operation
///
/// Redirects never carry a failure reason; errors only travel with a
/// re-rendered model.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<M> {
    /// Render a page from this model with any field errors attached
    Render { model: M, errors: Vec<FieldError> },

    /// Redirect to a destination
    Redirect(Target),
}

impl<M> Outcome<M> {
    /// Renders a model with no errors
    pub fn render(model: M) -> Self {
        Self::Render {
            model,
            errors: Vec::new(),
        }
    }

    /// Renders a model with errors attached
    pub fn render_with_errors(model: M, errors: Vec<FieldError>) -> Self {
        Self::Render { model, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_carries_no_errors() {
        let outcome: Outcome<&str> = Outcome::render("model");

        match outcome {
            Outcome::Render { model, errors } => {
                assert_eq!(model, "model");
                assert!(errors.is_empty());
            }
            Outcome::Redirect(target) => panic!("Unexpected redirect: {:?}", target),
        }
    }

    #[test]
    fn test_render_with_errors() {
        let errors = vec![FieldError::new("email", "Email is required")];
        let outcome = Outcome::render_with_errors("model", errors.clone());

        assert_eq!(
            outcome,
            Outcome::Render {
                model: "model",
                errors,
            }
        );
    }
}
