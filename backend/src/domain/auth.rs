//! Authentication primitives: login credentials and registration payloads.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{DisplayName, Email, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming. Login does not
///   apply the full registration email shape check; an address that never
///   registered simply fails the credential lookup.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.com", "password").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Owned copy of the password that zeroises on drop.
    ///
    /// Use this when the password has to move to another thread, e.g. into a
    /// blocking hash verification task.
    pub fn password_owned(&self) -> Zeroizing<String> {
        self.password.clone()
    }
}

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    Email(UserValidationError),
    EmptyPassword,
    DisplayName(UserValidationError),
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::DisplayName(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated registration payload handed to the registration service.
#[derive(Debug, Clone)]
pub struct Registration {
    email: Email,
    password: Zeroizing<String>,
    display_name: Option<DisplayName>,
}

impl Registration {
    /// Construct a registration from raw inbound strings.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<Self, RegistrationValidationError> {
        let email = Email::new(email).map_err(RegistrationValidationError::Email)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        let display_name = display_name
            .map(DisplayName::new)
            .transpose()
            .map_err(RegistrationValidationError::DisplayName)?;

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
            display_name,
        })
    }

    /// Email address to register.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Raw password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Owned copy of the password that zeroises on drop.
    pub fn password_owned(&self) -> Zeroizing<String> {
        self.password.clone()
    }

    /// Optional display name.
    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }
}
