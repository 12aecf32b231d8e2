//! Authentication primitives: credentials, sign-up forms and principals.
//!
//! Inbound adapters build these from raw strings; services and ports only see
//! validated values. Plaintext passwords live in [`Zeroizing`] buffers.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::{DisplayName, Email, Role, UserId, UserValidationError};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 8;

/// Validation failures for login and registration payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// The email failed validation.
    Email(UserValidationError),
    /// The display name failed validation.
    DisplayName(UserValidationError),
    /// The role was not recognised.
    Role(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN`].
    PasswordTooShort { min: usize },
}

impl CredentialsValidationError {
    /// Request field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::DisplayName(_) => "displayName",
            Self::Role(_) => "role",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) | Self::DisplayName(err) | Self::Role(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use volunteer_hub::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.org", "secret")
///     .expect("valid credentials");
/// assert_eq!(creds.email().as_ref(), "ada@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email).map_err(CredentialsValidationError::Email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    email: Email,
    password: Zeroizing<String>,
    display_name: DisplayName,
    role: Role,
}

impl SignUp {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        display_name: &str,
        role: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email).map_err(CredentialsValidationError::Email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        let display_name = DisplayName::new(display_name.trim())
            .map_err(CredentialsValidationError::DisplayName)?;
        let role = role.parse().map_err(CredentialsValidationError::Role)?;
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
            display_name,
            role,
        })
    }

    /// Normalised email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested display name.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Opaque password hash produced by a password hasher adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Identity resolved from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Authenticated user.
    pub user_id: UserId,
    /// Role embedded in the token.
    pub role: Role,
}

impl Principal {
    /// Build a principal.
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Whether the principal may act as an organizer.
    pub fn is_organizer(&self) -> bool {
        matches!(self.role, Role::Organizer)
    }
}

/// Token minted by the auth service at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded bearer token.
    pub token: String,
    /// Instant after which `verify` rejects the token.
    pub expires_at: DateTime<Utc>,
}
