// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! This module enforces password requirements at signup.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password and confirmation do not match.
    #[error("Введённые пароли не совпадают.")]
    ConfirmationMismatch,

    /// Password is too short.
    #[error(
        "Введённый пароль слишком короткий. Он должен содержать как минимум {min_length} символов."
    )]
    TooShort { min_length: usize },

    /// Password consists of digits only.
    #[error("Введённый пароль состоит только из цифр.")]
    EntirelyNumeric,

    /// Password matches the username.
    #[error("Введённый пароль слишком похож на имя пользователя.")]
    MatchesUsername,
}

impl PasswordPolicyError {
    /// The form field the error is reported against.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::ConfirmationMismatch => "password_confirmation",
            Self::TooShort { .. } | Self::EntirelyNumeric | Self::MatchesUsername => "password",
        }
    }
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length, in characters.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    /// Validates a password against the policy.
    ///
    /// # Errors
    ///
    /// Returns the first rule the password breaks, checked in this order:
    /// confirmation, length, all digits, equal to the username
    /// (case-insensitive).
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        username: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::EntirelyNumeric);
        }

        if password.to_lowercase() == username.to_lowercase() {
            return Err(PasswordPolicyError::MatchesUsername);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert!(policy.validate("MyP@ssw0rd", "MyP@ssw0rd", "author").is_ok());
        // Exactly 8 characters, counted as characters rather than bytes
        assert!(policy.validate("пароль12", "пароль12", "author").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> = policy.validate("Short1!", "Short1!", "author");

        assert_eq!(result, Err(PasswordPolicyError::TooShort { min_length: 8 }));
    }

    #[test]
    fn test_entirely_numeric() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> =
            policy.validate("1234567890", "1234567890", "author");

        assert_eq!(result, Err(PasswordPolicyError::EntirelyNumeric));
    }

    #[test]
    fn test_matches_username() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> =
            policy.validate("LongAuthor", "LongAuthor", "longauthor");

        assert_eq!(result, Err(PasswordPolicyError::MatchesUsername));
    }

    #[test]
    fn test_confirmation_mismatch() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> =
            policy.validate("MyP@ssw0rd", "MyP@ssw0rd!", "author");

        assert_eq!(result, Err(PasswordPolicyError::ConfirmationMismatch));
        assert_eq!(
            PasswordPolicyError::ConfirmationMismatch.field(),
            "password_confirmation"
        );
    }
}
