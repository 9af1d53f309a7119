//! Login and registration input.
//!
//! Both forms are validated locally before anything is sent to the service.

use crate::common::constants::MIN_PASSWORD_LEN;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Reasons a login or registration form is rejected before any request is made.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthFormError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
}

/// Email and password for `POST /auth/login`.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn validate(&self) -> Result<(), AuthFormError> {
        if self.email.is_empty() || self.password.expose_secret().is_empty() {
            return Err(AuthFormError::MissingFields);
        }
        Ok(())
    }

    pub(crate) fn body(&self) -> LoginBody<'_> {
        LoginBody {
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }
}

/// A new account for `POST /auth/register`.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
        }
    }

    /// Checks, in order: all fields present, passwords equal, password long enough.
    pub fn validate(&self) -> Result<(), AuthFormError> {
        let password = self.password.expose_secret();
        let confirm = self.confirm_password.expose_secret();

        if self.name.is_empty() || self.email.is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(AuthFormError::MissingFields);
        }
        if password != confirm {
            return Err(AuthFormError::PasswordMismatch);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthFormError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        Ok(())
    }

    pub(crate) fn body(&self) -> RegisterBody<'_> {
        RegisterBody {
            name: &self.name,
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}
