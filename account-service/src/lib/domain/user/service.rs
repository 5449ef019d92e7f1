use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher used for new passwords and login checks
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    /// Reject a login that has no stored hash to check, after the same
    /// Argon2 work a wrong password costs.
    fn reject_without_hash(&self, password: &str) -> UserError {
        if let Err(e) = self.password_hasher.verify_dummy(password) {
            tracing::warn!(error = %e, "Dummy password verification failed");
        }
        UserError::InvalidCredentials
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // Advisory checks; the unique constraints in the store decide races.
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let new_user = NewUser {
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let user = self.repository.create(new_user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn authenticate(&self, command: LoginCommand) -> Result<User, UserError> {
        let username = match Username::new(command.username) {
            Ok(username) => username,
            Err(_) => return Err(self.reject_without_hash(&command.password)),
        };

        let user = match self.repository.find_by_username(&username).await? {
            Some(user) => user,
            None => {
                tracing::debug!(username = %username, "Login for unknown username");
                return Err(self.reject_without_hash(&command.password));
            }
        };

        if !self
            .password_hasher
            .verify(&command.password, &user.password_hash)?
        {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
