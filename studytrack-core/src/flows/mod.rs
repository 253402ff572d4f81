/// Flow controllers
///
/// The account flow handles registration, login, and logout; the task flow
/// handles the ownership-scoped task pages. Both are framework-free: they
/// take a resolved principal and form models in, and hand an [`Outcome`]
/// back for the web layer to turn into a response.
///
/// # Modules
///
/// - [`account`]: registration, login, logout, user listing
/// - [`tasks`]: task list, creation, completion toggling, deletion
/// - [`forms`]: form models shared with the page templates
/// - [`outcome`]: the render-or-redirect instruction type

pub mod account;
pub mod forms;
pub mod outcome;
pub mod tasks;

pub use account::AccountFlow;
pub use outcome::{Outcome, Target};
pub use tasks::TaskFlow;
