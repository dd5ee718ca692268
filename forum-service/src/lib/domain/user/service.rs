use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with an injected repository.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self.repository.exists_by_username(&command.username).await? {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }
        if self
            .repository
            .exists_by_email(command.email.as_str())
            .await?
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            subscriptions: HashSet::new(),
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn resolve_login(&self, login: &str) -> Result<User, UserError> {
        // Username lookup takes precedence; an identifier that does not even
        // parse as a username goes straight to the email path.
        if let Ok(username) = Username::new(login.to_string()) {
            if let Some(user) = self.repository.find_by_username(&username).await? {
                return Ok(user);
            }
        }

        self.repository
            .find_by_email(login)
            .await?
            .ok_or(UserError::InvalidCredentials)
    }

    async fn get_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFound(username.to_string()))
    }

    async fn update_profile(
        &self,
        username: &Username,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFound(username.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email && self.repository.exists_by_email(new_email.as_str()).await?
            {
                return Err(UserError::EmailAlreadyExists(
                    new_email.as_str().to_string(),
                ));
            }
            user.email = new_email;
        }

        if let Some(new_username) = command.username {
            if new_username != user.username
                && self.repository.exists_by_username(&new_username).await?
            {
                return Err(UserError::UsernameAlreadyExists(new_username.to_string()));
            }
            user.username = new_username;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.password_hasher.hash(&new_password)?;
        }

        self.repository.update(user).await
    }
}
