use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateCredentialsCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
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
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher configured with the deployment's bcrypt cost
    pub fn new(repository: Arc<UR>, password_hasher: auth::PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        self.password_hasher
            .hash(password)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(&command.password)?;

        let user = self.repository.create(&command.email, &password_hash).await?;
        tracing::info!(user_id = %user.id, "User created");

        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn update_credentials(
        &self,
        id: &UserId,
        command: UpdateCredentialsCommand,
    ) -> Result<User, UserError> {
        let password_hash = self.hash_password(&command.password)?;

        let user = self
            .repository
            .update_credentials(id, &command.email, &password_hash)
            .await?;
        tracing::info!(user_id = %user.id, "User credentials updated");

        Ok(user)
    }

    async fn upgrade_to_chirpy_red(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.set_chirpy_red(id).await?;
        tracing::info!(user_id = %id, "User upgraded to Chirpy Red");

        Ok(())
    }

    async fn delete_all_users(&self) -> Result<u64, UserError> {
        let deleted = self.repository.delete_all().await?;
        tracing::warn!(deleted, "All users deleted");

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn update_credentials(&self, id: &UserId, email: &EmailAddress, password_hash: &str) -> Result<User, UserError>;
            async fn set_chirpy_red(&self, id: &UserId) -> Result<(), UserError>;
            async fn delete_all(&self) -> Result<u64, UserError>;
        }
    }

    fn stored_user(id: UserId, email: &EmailAddress, password_hash: &str) -> User {
        User {
            id,
            email: email.clone(),
            password_hash: password_hash.to_string(),
            is_chirpy_red: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(repository: MockTestUserRepository) -> UserService<MockTestUserRepository> {
        UserService::new(Arc::new(repository), auth::PasswordHasher::with_cost(4))
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|email, password_hash| {
                email.as_str() == "walt@breakingbad.com" && password_hash.starts_with("$2")
            })
            .times(1)
            .returning(|email, password_hash| Ok(stored_user(UserId::new(), email, password_hash)));

        let command = CreateUserCommand::new(
            EmailAddress::new("walt@breakingbad.com".to_string()).unwrap(),
            "04234".to_string(),
        );

        let user = service(repository).create_user(command).await.unwrap();

        assert_eq!(user.email.as_str(), "walt@breakingbad.com");
        assert!(!user.is_chirpy_red);
        // Password is hashed with real bcrypt
        assert!(auth::PasswordHasher::new()
            .verify("04234", &user.password_hash)
            .is_ok());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|email, _| Err(UserError::EmailAlreadyExists(email.to_string())));

        let command = CreateUserCommand::new(
            EmailAddress::new("walt@breakingbad.com".to_string()).unwrap(),
            "04234".to_string(),
        );

        let result = service(repository).create_user(command).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_user_password_too_long() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(0);

        let command = CreateUserCommand::new(
            EmailAddress::new("walt@breakingbad.com".to_string()).unwrap(),
            "x".repeat(100),
        );

        let result = service(repository).create_user(command).await;
        assert!(matches!(result, Err(UserError::PasswordHashing(_))));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();
        let email = EmailAddress::new("jesse@breakingbad.com".to_string()).unwrap();
        let stored = stored_user(user_id, &email, "hash");

        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let user = service(repository).get_user(&user_id).await.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.email, email);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository).get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_credentials_rehashes_password() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        repository
            .expect_update_credentials()
            .withf(move |id, email, password_hash| {
                *id == user_id
                    && email.as_str() == "heisenberg@breakingbad.com"
                    && password_hash.starts_with("$2")
            })
            .times(1)
            .returning(|id, email, password_hash| Ok(stored_user(*id, email, password_hash)));

        let command = UpdateCredentialsCommand {
            email: EmailAddress::new("heisenberg@breakingbad.com".to_string()).unwrap(),
            password: "losPollosHermanos".to_string(),
        };

        let user = service(repository)
            .update_credentials(&user_id, command)
            .await
            .unwrap();

        assert_eq!(user.id, user_id);
        assert!(auth::PasswordHasher::new()
            .verify("losPollosHermanos", &user.password_hash)
            .is_ok());
    }

    #[tokio::test]
    async fn test_upgrade_unknown_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_set_chirpy_red()
            .times(1)
            .returning(|id| Err(UserError::NotFound(id.to_string())));

        let result = service(repository)
            .upgrade_to_chirpy_red(&UserId::new())
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_all_users() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_delete_all().times(1).returning(|| Ok(3));

        assert_eq!(service(repository).delete_all_users().await.unwrap(), 3);
    }
}
