use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, User, UserAccount, UserId};

use super::lock;

/// Accounts keyed by id, with a unique email index.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Accounts>,
}

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<UserId, UserAccount>,
    by_email: HashMap<Email, UserId>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let mut accounts = lock(&self.accounts);
        let email = account.user().email().clone();
        if accounts.by_email.contains_key(&email) {
            return Err(UserRepositoryError::duplicate_email(email.as_ref()));
        }
        let id = *account.user().id();
        accounts.by_email.insert(email, id);
        accounts.by_id.insert(id, account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let accounts = lock(&self.accounts);
        Ok(accounts
            .by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.accounts)
            .by_id
            .get(id)
            .map(|account| account.user().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PasswordHash, UserName};
    use rstest::{fixture, rstest};

    fn account(email: &str) -> UserAccount {
        let user = User::new(
            UserId::random(),
            UserName::new("Demo User").expect("valid name"),
            Email::new(email).expect("valid email"),
        );
        UserAccount::new(user, PasswordHash::new("$2b$10$hash"))
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn created_accounts_are_found_by_email_and_id(repo: InMemoryUserRepository) {
        let stored = account("demo@example.com");
        repo.create(&stored).await.expect("create");

        let by_email = repo
            .find_by_email(stored.user().email())
            .await
            .expect("lookup");
        assert_eq!(by_email.as_ref(), Some(&stored));

        let by_id = repo.find_by_id(stored.user().id()).await.expect("lookup");
        assert_eq!(by_id.as_ref(), Some(stored.user()));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(repo: InMemoryUserRepository) {
        repo.create(&account("demo@example.com"))
            .await
            .expect("first create");

        let err = repo
            .create(&account("demo@example.com"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserRepositoryError::DuplicateEmail { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn email_lookup_is_case_sensitive(repo: InMemoryUserRepository) {
        repo.create(&account("demo@example.com"))
            .await
            .expect("create");

        let upper = Email::new("Demo@Example.com").expect("valid email");
        assert!(repo.find_by_email(&upper).await.expect("lookup").is_none());
        repo.create(&account("Demo@Example.com"))
            .await
            .expect("distinct address");
    }
}
