/// Identity: accounts, credentials, and sessions
///
/// # Modules
///
/// - [`service`]: the capability trait both flow controllers consume
/// - [`password`]: Argon2id password hashing and strength policy
/// - [`session`]: session tokens, registry, and the per-request slot
/// - [`principal`]: the resolved identity behind a request
/// - [`pg`]: PostgreSQL-backed implementation
/// - [`memory`]: in-memory implementation for tests
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: secure random generation with SHA-256 digests at rest
/// - **Enumeration Resistance**: wrong email and wrong password are indistinguishable
///
/// # Example
///
/// ```
/// use studytrack_core::identity::service::{IdentityService, Signup, UserCreation};
/// use studytrack_core::identity::memory::MemoryIdentity;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let identity = MemoryIdentity::new();
///
/// let signup = Signup {
///     username: "alice@mail.com".to_string(),
///     email: "alice@mail.com".to_string(),
///     full_name: "Alice A".to_string(),
/// };
///
/// match identity.create_user(signup, "Test123!").await? {
///     UserCreation::Created(user) => println!("Registered {}", user.email),
///     UserCreation::Rejected(errors) => println!("Rejected: {:?}", errors),
/// }
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod password;
pub mod pg;
pub mod principal;
pub mod service;
pub mod session;

pub use principal::Principal;
pub use service::IdentityService;
pub use session::{SessionChange, SessionRegistry, SessionSlot};
