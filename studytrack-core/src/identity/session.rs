/// Session issuance and resolution
///
/// Signing in issues an opaque session token that the web layer hands to the
/// browser as a cookie. The registry keeps only the SHA-256 digest of each
/// token, so a leaked process dump never yields a usable credential.
///
/// # Security
///
/// - **Format**: `st_{32_chars}` (prefix + 32 random alphanumeric chars)
/// - **Storage**: tokens are hashed with SHA-256 before storage
/// - **Expiry**: 24 hours by default, 30 days for persistent sessions
///
/// # Example
///
/// ```
/// use studytrack_core::identity::principal::Principal;
/// use studytrack_core::identity::session::SessionRegistry;
/// use uuid::Uuid;
///
/// let registry = SessionRegistry::default();
/// let principal = Principal::new(Uuid::new_v4(), "alice@mail.com");
///
/// let token = registry.issue(principal.clone(), false);
/// assert!(token.starts_with("st_"));
/// assert_eq!(registry.resolve(&token), Some(principal));
///
/// registry.revoke(&token);
/// assert_eq!(registry.resolve(&token), None);
/// ```

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::identity::principal::Principal;

/// Length of the random part of a session token (characters)
const TOKEN_RANDOM_LENGTH: usize = 32;

/// Session token prefix
const TOKEN_PREFIX: &str = "st_";

/// Total length of a session token (prefix + random)
pub const SESSION_TOKEN_LENGTH: usize = TOKEN_PREFIX.len() + TOKEN_RANDOM_LENGTH;

/// Generates a new session token
///
/// Creates a cryptographically random token with the format `st_{32_chars}`.
/// Also returns the SHA-256 digest used as the registry key.
///
/// # Returns
///
/// Tuple of (plaintext_token, sha256_digest)
pub fn generate_session_token() -> (String, String) {
    let random_part = generate_random_string(TOKEN_RANDOM_LENGTH);
    let token = format!("{}{}", TOKEN_PREFIX, random_part);
    let digest = hash_session_token(&token);

    (token, digest)
}

/// Generates a random alphanumeric string
///
/// Uses base62 encoding (A-Z, a-z, 0-9) for cookie-safe tokens.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Hashes a session token using SHA-256
///
/// # Returns
///
/// Hex-encoded SHA-256 digest (64 characters)
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Validates session token format
///
/// Checks that the token starts with `st_`, has the expected length, and
/// contains only alphanumeric characters after the prefix. Lets the registry
/// reject junk cookie values without a lookup.
pub fn validate_token_format(token: &str) -> bool {
    if token.len() != SESSION_TOKEN_LENGTH {
        return false;
    }

    if !token.starts_with(TOKEN_PREFIX) {
        return false;
    }

    let random_part = &token[TOKEN_PREFIX.len()..];
    random_part.chars().all(|c| c.is_alphanumeric())
}

/// One live session: who it belongs to and when it stops being valid
#[derive(Debug, Clone)]
struct SessionEntry {
    principal: Principal,
    expires_at: DateTime<Utc>,
}

/// In-process session registry
///
/// Maps token digests to principals. Sessions do not survive a process
/// restart; users sign in again.
pub struct SessionRegistry {
    entries: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
    persistent_ttl: Duration,
}

impl SessionRegistry {
    /// Creates a registry with the given lifetimes for regular and
    /// "remember me" sessions
    pub fn new(ttl: Duration, persistent_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            persistent_ttl,
        }
    }

    /// Issues a session for a principal and returns the plaintext token
    ///
    /// The plaintext is handed to the caller exactly once; only its digest
    /// is retained.
    pub fn issue(&self, principal: Principal, persistent: bool) -> String {
        let (token, digest) = generate_session_token();
        let ttl = if persistent {
            self.persistent_ttl
        } else {
            self.ttl
        };
        let entry = SessionEntry {
            principal,
            expires_at: Utc::now() + ttl,
        };

        self.entries.write().insert(digest, entry);
        token
    }

    /// Resolves a token to its principal
    ///
    /// Returns `None` for unknown, malformed, or expired tokens. Expired
    /// entries are pruned on the way out.
    pub fn resolve(&self, token: &str) -> Option<Principal> {
        if !validate_token_format(token) {
            return None;
        }

        let digest = hash_session_token(token);
        let now = Utc::now();

        {
            let entries = self.entries.read();
            match entries.get(&digest) {
                Some(entry) if entry.expires_at > now => return Some(entry.principal.clone()),
                Some(_) => {} // Expired, fall through to prune
                None => return None,
            }
        }

        self.entries.write().remove(&digest);
        None
    }

    /// Revokes a session so the token stops resolving
    pub fn revoke(&self, token: &str) {
        let digest = hash_session_token(token);
        self.entries.write().remove(&digest);
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(Duration::hours(24), Duration::days(30))
    }
}

/// What should happen to the caller's session after a flow operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// A new session was issued; the web layer sets the cookie
    Establish { token: String, persistent: bool },

    /// The session ended; the web layer clears the cookie
    Clear,
}

/// Per-request session carrier
///
/// Holds the token that arrived with the request (if any) and the change the
/// flows want applied to it. The web layer builds one slot per request and
/// applies at most one cookie change from it on the way out.
#[derive(Debug, Clone, Default)]
pub struct SessionSlot {
    token: Option<String>,
    change: Option<SessionChange>,
}

impl SessionSlot {
    /// A slot for a request that carried no session token
    pub fn empty() -> Self {
        Self::default()
    }

    /// A slot for a request that carried a session token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            change: None,
        }
    }

    /// The token currently associated with the request, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Records a freshly issued session
    ///
    /// The slot's token is replaced so operations later in the same request
    /// see the new session.
    pub fn establish(&mut self, token: String, persistent: bool) {
        self.token = Some(token.clone());
        self.change = Some(SessionChange::Establish { token, persistent });
    }

    /// Records that the session ended
    pub fn clear(&mut self) {
        self.token = None;
        self.change = Some(SessionChange::Clear);
    }

    /// Takes the pending change, leaving the slot with none
    pub fn take_change(&mut self) -> Option<SessionChange> {
        self.change.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_principal() -> Principal {
        Principal::new(Uuid::new_v4(), "alice@mail.com")
    }

    #[test]
    fn test_generate_session_token() {
        let (token1, digest1) = generate_session_token();
        let (token2, digest2) = generate_session_token();

        // Check format
        assert!(token1.starts_with("st_"));
        assert_eq!(token1.len(), SESSION_TOKEN_LENGTH);

        // Check randomness
        assert_ne!(token1, token2);
        assert_ne!(digest1, digest2);

        // Check digest length
        assert_eq!(digest1.len(), 64); // SHA-256 hex
    }

    #[test]
    fn test_hash_session_token() {
        let digest = hash_session_token("st_test123");

        assert_eq!(digest.len(), 64);

        // Deterministic
        assert_eq!(digest, hash_session_token("st_test123"));

        // Different token = different digest
        assert_ne!(digest, hash_session_token("st_different"));
    }

    #[test]
    fn test_validate_token_format() {
        let (token, _) = generate_session_token();
        assert!(validate_token_format(&token));

        // Wrong prefix
        assert!(!validate_token_format("xx_abcdefghijklmnopqrstuvwxyz123456"));

        // Too short
        assert!(!validate_token_format("st_short"));

        // Special characters
        assert!(!validate_token_format("st_abc!@#$%^&*()_+={}[]|abcdefghij"));

        // Empty
        assert!(!validate_token_format(""));
    }

    #[test]
    fn test_issue_and_resolve() {
        let registry = SessionRegistry::default();
        let principal = test_principal();

        let token = registry.issue(principal.clone(), false);

        assert!(token.starts_with("st_"));
        assert_eq!(registry.resolve(&token), Some(principal));
    }

    #[test]
    fn test_resolve_unknown_token() {
        let registry = SessionRegistry::default();
        let (token, _) = generate_session_token();

        assert_eq!(registry.resolve(&token), None);
    }

    #[test]
    fn test_resolve_expired_token_prunes_entry() {
        // Negative lifetime puts the expiry in the past immediately
        let registry = SessionRegistry::new(Duration::seconds(-1), Duration::days(30));
        let token = registry.issue(test_principal(), false);

        assert_eq!(registry.resolve(&token), None);
        assert!(registry.entries.read().is_empty(), "Expired entry should be pruned");
    }

    #[test]
    fn test_revoke() {
        let registry = SessionRegistry::default();
        let token = registry.issue(test_principal(), false);

        registry.revoke(&token);

        assert_eq!(registry.resolve(&token), None);
    }

    #[test]
    fn test_persistent_session_gets_longer_expiry() {
        let registry = SessionRegistry::new(Duration::hours(24), Duration::days(30));
        let token = registry.issue(test_principal(), true);

        let digest = hash_session_token(&token);
        let entries = registry.entries.read();
        let entry = entries.get(&digest).expect("Entry should exist");

        assert!(entry.expires_at > Utc::now() + Duration::days(29));
    }

    #[test]
    fn test_plaintext_token_never_stored() {
        let registry = SessionRegistry::default();
        let token = registry.issue(test_principal(), false);

        let entries = registry.entries.read();
        assert!(!entries.contains_key(&token));
        assert!(entries.contains_key(&hash_session_token(&token)));
    }

    #[test]
    fn test_slot_establish_sets_token_and_change() {
        let mut slot = SessionSlot::empty();
        assert_eq!(slot.token(), None);

        slot.establish("st_abc".to_string(), true);

        assert_eq!(slot.token(), Some("st_abc"));
        assert_eq!(
            slot.take_change(),
            Some(SessionChange::Establish {
                token: "st_abc".to_string(),
                persistent: true,
            })
        );
    }

    #[test]
    fn test_slot_clear() {
        let mut slot = SessionSlot::with_token("st_abc");
        assert_eq!(slot.token(), Some("st_abc"));

        slot.clear();

        assert_eq!(slot.token(), None);
        assert_eq!(slot.take_change(), Some(SessionChange::Clear));
    }

    #[test]
    fn test_slot_take_change_consumes() {
        let mut slot = SessionSlot::empty();
        slot.establish("st_abc".to_string(), false);

        assert!(slot.take_change().is_some());
        assert!(slot.take_change().is_none());
    }
}
