use async_trait::async_trait;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// Username and email uniqueness are pre-checked; either collision is a
    /// conflict. The password is hashed before anything is persisted.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Resolve a login identifier to a user.
    ///
    /// The identifier is looked up as a username first; only when no
    /// username matches is it retried as an email address. An identifier
    /// that is some user's username and some other user's email resolves
    /// to the username match.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Neither lookup matched
    /// * `DatabaseError` - Database operation failed
    async fn resolve_login(&self, login: &str) -> Result<User, UserError>;

    /// Retrieve a user by unique username.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Update the profile of an existing user.
    ///
    /// Uniqueness is re-validated only for fields that actually change,
    /// excluding the user's own current value. A provided password is
    /// re-hashed.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        username: &Username,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// `update` persists the whole aggregate, subscription set included, in a
/// single transaction scoped to the one user's records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Check whether a username is taken.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError>;

    /// Check whether an email is registered.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError>;

    /// Update an existing user, replacing profile fields and the
    /// subscription set atomically.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;
}
