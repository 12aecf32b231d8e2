//! User identity model: identifiers, display names, emails and roles.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyDisplayName,
    DisplayNameTooShort { min: usize },
    DisplayNameTooLong { max: usize },
    DisplayNameInvalidCharacters,
    EmptyEmail,
    InvalidEmail,
    UnknownRole { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooShort { min } => {
                write!(f, "display name must be at least {min} characters")
            }
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
            Self::DisplayNameInvalidCharacters => write!(
                f,
                "display name may only contain letters, numbers, spaces, or underscores",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@example.org"),
            Self::UnknownRole { value } => {
                write!(f, "role must be Organizer or Volunteer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable display name for the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

/// Minimum allowed length for a display name.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 32;

static DISPLAY_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn display_name_regex() -> &'static Regex {
    DISPLAY_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_ ]+$")
            .unwrap_or_else(|error| panic!("display name regex failed to compile: {error}"))
    })
}

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }

        let length = display_name.chars().count();
        if length < DISPLAY_NAME_MIN {
            return Err(UserValidationError::DisplayNameTooShort {
                min: DISPLAY_NAME_MIN,
            });
        }
        if length > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }

        if !display_name_regex().is_match(&display_name) {
            return Err(UserValidationError::DisplayNameInvalidCharacters);
        }

        Ok(Self(display_name))
    }

    /// Lowercased copy used for case-insensitive comparisons.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login email, normalised to trimmed lowercase.
///
/// Two addresses differing only in case refer to the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

/// Maximum accepted email length.
pub const EMAIL_MAX: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Normalise and validate an email address.
    ///
    /// # Examples
    /// ```
    /// use volunteer_hub::domain::Email;
    ///
    /// let email = Email::new("  Ada@Example.org ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.org");
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if normalised.chars().count() > EMAIL_MAX || !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    /// Publishes events and reads their rosters.
    Organizer,
    /// Registers for events.
    Volunteer,
}

impl Role {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organizer => "Organizer",
            Self::Volunteer => "Volunteer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organizer" => Ok(Self::Organizer),
            "volunteer" => Ok(Self::Volunteer),
            _ => Err(UserValidationError::UnknownRole {
                value: s.to_owned(),
            }),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_owned()
    }
}

impl TryFrom<String> for Role {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` is immutable for the lifetime of the account.
/// - `email` is unique across users (enforced by the identity store).
///
/// The password hash is never part of this type; only the identity store and
/// the account service see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    display_name: DisplayName,
    email: Email,
    role: Role,
    profile_image_url: Option<String>,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, display_name: DisplayName, email: Email, role: Role) -> Self {
        Self {
            id,
            display_name,
            email,
            role,
            profile_image_url: None,
        }
    }

    /// Attach a profile image URL.
    pub fn with_profile_image_url(mut self, url: Option<String>) -> Self {
        self.profile_image_url = url;
        self
    }

    /// Replace the display name.
    pub fn rename(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name shown to other users.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Normalised login email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Account role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Public URL of the profile picture, if one was uploaded.
    pub fn profile_image_url(&self) -> Option<&str> {
        self.profile_image_url.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    #[serde(alias = "display_name")]
    display_name: String,
    email: String,
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_image_url: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            display_name,
            email,
            role,
            profile_image_url,
        } = value;
        Self {
            id: id.into(),
            display_name: display_name.into(),
            email: email.into(),
            role: role.into(),
            profile_image_url,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::new(value.id)?,
            DisplayName::new(value.display_name)?,
            Email::new(value.email)?,
            value.role.parse()?,
        )
        .with_profile_image_url(value.profile_image_url))
    }
}
