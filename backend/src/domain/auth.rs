//! Authentication primitives: registration and login payloads, password
//! hashes, bearer tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{Email, User, UserName, UserValidationError};

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    /// Name or email failed validation.
    #[error(transparent)]
    User(#[from] UserValidationError),
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password is shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl AuthValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(inner) => inner.field(),
            Self::EmptyEmail => "email",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
        }
    }
}

/// Validated registration request.
///
/// ## Invariants
/// - `name` and `email` satisfy their value-object rules.
/// - `password` has at least [`PASSWORD_MIN`] characters; it is held in
///   zeroizing storage and never trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: UserName,
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let name = UserName::new(name)?;
        let email = Email::new(email)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Display name to register.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Email to register.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plain-text password to hash.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated login credentials.
///
/// The email is only trimmed here; format checks are skipped so that an
/// unknown address reports bad credentials instead of a validation error.
///
/// # Examples
/// ```
/// use trip_planner::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" demo@example.com ", "password123").unwrap();
/// assert_eq!(creds.email(), "demo@example.com");
/// assert_eq!(creds.password(), "password123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(AuthValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// One-way password hash as produced by the hashing adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Signed bearer token handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(Zeroizing::new(encoded.into()))
    }

    /// Encoded token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Result of a successful register or login: a token and the user summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: AuthToken,
    pub user: User,
}
