use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;
use super::validation::{normalize_required, validate_positive_i64};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) name: String,
    pub(crate) password: String,
    pub(crate) city: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        let phone = normalize_phone(&self.phone)?;
        let name = normalize_name(&self.name)?;
        let city = normalize_city(&self.city)?;
        let password_len = self.password.chars().count();
        if !(8..=128).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            email,
            phone,
            name,
            password: self.password,
            city,
        })
    }
}

/// `username` is either an email or a phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoginIdentifier {
    Email(String),
    Phone(String),
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 255 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..255 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }

    pub(crate) fn identifier(&self) -> LoginIdentifier {
        if self.username.contains('@') {
            LoginIdentifier::Email(self.username.to_lowercase())
        } else {
            LoginIdentifier::Phone(self.username.clone())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateProfileRequest {
    pub(crate) name: String,
    pub(crate) city: String,
}

impl UpdateProfileRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_name(&self.name)?,
            city: normalize_city(&self.city)?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) name: String,
    pub(crate) city: String,
}

impl User {
    pub(crate) fn new(
        id: i64,
        email: impl Into<String>,
        phone: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;

        Ok(Self {
            id,
            email: normalize_email(&email.into())?,
            phone: normalize_phone(&phone.into())?,
            name: normalize_name(&name.into())?,
            city: normalize_city(&city.into())?,
        })
    }
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

fn normalize_phone(phone: &str) -> Result<String, DomainError> {
    let phone = phone.trim();
    let valid = (5..=32).contains(&phone.len())
        && !phone.contains('@')
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    if !valid {
        return Err(DomainError::Validation {
            field: "phone",
            message: "must be 5..32 chars of digits, spaces, '+', '-', '(' or ')'",
        });
    }
    Ok(phone.to_string())
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    normalize_required("name", name, 255, "must be 1..255 chars")
}

fn normalize_city(city: &str) -> Result<String, DomainError> {
    normalize_required("city", city, 255, "must be 1..255 chars")
}

#[cfg(test)]
mod tests {
    use super::{
        LoginIdentifier, LoginRequest, RegisterRequest, UpdateProfileRequest, User,
        normalize_email, normalize_phone,
    };
    use crate::domain::error::DomainError;

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "test@example.com", "+77011234567", "Aruzhan", "Almaty");
        assert!(result.is_err());
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn normalize_phone_rejects_letters_and_at_sign() {
        assert!(normalize_phone("+7 (701) 123-45-67").is_ok());
        assert!(normalize_phone("call-me-maybe").is_err());
        assert!(normalize_phone("a@b.kz").is_err());
    }

    #[test]
    fn register_password_length_is_checked() {
        let short = sample_register("short");
        assert!(short.validate().is_err());

        let validated = sample_register("very-secure-password")
            .validate()
            .expect("must be valid");
        assert_eq!(validated.email, "valid@example.com");
        assert_eq!(validated.name, "Aruzhan");
        assert_eq!(validated.city, "Almaty");
    }

    #[test]
    fn login_identifier_depends_on_at_sign() {
        let by_email = LoginRequest {
            username: "  Valid@Example.com ".to_string(),
            password: "secret".to_string(),
        }
        .validate()
        .expect("must be valid");
        assert_eq!(
            by_email.identifier(),
            LoginIdentifier::Email("valid@example.com".to_string())
        );

        let by_phone = LoginRequest {
            username: "+77011234567".to_string(),
            password: "secret".to_string(),
        }
        .validate()
        .expect("must be valid");
        assert_eq!(
            by_phone.identifier(),
            LoginIdentifier::Phone("+77011234567".to_string())
        );
    }

    #[test]
    fn login_rejects_empty_password() {
        let err = LoginRequest {
            username: "valid@example.com".to_string(),
            password: String::new(),
        }
        .validate()
        .expect_err("empty password must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "password", .. }));
    }

    #[test]
    fn update_profile_rejects_blank_city() {
        let err = UpdateProfileRequest {
            name: "Aruzhan".to_string(),
            city: "  ".to_string(),
        }
        .validate()
        .expect_err("blank city must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "city", .. }));
    }

    fn sample_register(password: &str) -> RegisterRequest {
        RegisterRequest {
            email: " VALID@example.com ".to_string(),
            phone: "+77011234567".to_string(),
            name: " Aruzhan ".to_string(),
            password: password.to_string(),
            city: "Almaty".to_string(),
        }
    }
}
