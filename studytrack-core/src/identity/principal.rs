/// Authenticated principal
///
/// A `Principal` is the resolved identity behind a request: which user the
/// session token belongs to. It is threaded explicitly into every flow
/// operation rather than read from ambient state, so the same flow code works
/// under a web server, a test harness, or an in-memory fake.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity a valid session token resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// ID of the signed-in user
    pub user_id: Uuid,

    /// Email of the signed-in user at sign-in time
    pub email: String,
}

impl Principal {
    /// Creates a principal for a user
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_new() {
        let id = Uuid::new_v4();
        let principal = Principal::new(id, "alice@mail.com");

        assert_eq!(principal.user_id, id);
        assert_eq!(principal.email, "alice@mail.com");
    }
}
