//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, PasswordHash, User, UserAccount, UserId, UserName};

use super::diesel_error_mapping::{map_diesel_error, pool_error_message, unique_violation};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the credential store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(pool_error_message(error))
}

fn map_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserRepositoryError> {
    let invalid = |err: crate::domain::UserValidationError| {
        UserRepositoryError::query(format!("stored user {} is invalid: {err}", row.id))
    };
    let user = User::new(
        UserId::from_uuid(row.id),
        UserName::new(&row.name).map_err(invalid)?,
        Email::new(&row.email).map_err(invalid)?,
    );
    Ok(UserAccount::new(user, PasswordHash::new(row.password_hash)))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user = account.user();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            password_hash: account.password_hash().as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if unique_violation(&err).is_some() {
                    UserRepositoryError::duplicate_email(user.email().as_ref())
                } else {
                    map_error(err)
                }
            })
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        Ok(row
            .map(row_to_account)
            .transpose()?
            .map(UserAccount::into_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(name: &str, email: &str) -> UserRow {
        UserRow {
            id: Uuid::nil(),
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash: "$2b$10$hash".to_owned(),
        }
    }

    #[rstest]
    fn valid_rows_become_accounts() {
        let account = row_to_account(row("Demo User", "demo@example.com")).expect("valid row");
        assert_eq!(account.user().email().as_ref(), "demo@example.com");
        assert_eq!(account.password_hash().as_str(), "$2b$10$hash");
    }

    #[rstest]
    fn corrupt_rows_map_to_query_errors() {
        let err = row_to_account(row("Demo User", "not-an-email")).expect_err("invalid email");
        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_failures_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, UserRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }
}
